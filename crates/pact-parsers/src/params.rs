use pact_core::types::{Param, ParamKind};

/// Errors produced while reading a textual parameter list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unbalanced brackets or quotes in `{text}`")]
    Unbalanced { text: String },

    #[error("Unexpected text after parameter list: `{text}`")]
    TrailingText { text: String },

    #[error("Empty parameter at position {position}")]
    EmptyParameter { position: usize },

    #[error("Invalid parameter name: `{name}`")]
    InvalidName { name: String },

    #[error("Duplicate parameter: {name}")]
    DuplicateParameter { name: String },

    #[error("`*` may appear only once")]
    DuplicateStar,

    #[error("`/` must follow at least one positional parameter and precede `*`")]
    MisplacedSlash,

    #[error("Parameter `{name}` follows the `**` collector")]
    ParameterAfterVarKeyword { name: String },

    #[error("Parameter without default `{name}` follows a parameter with a default")]
    NonDefaultAfterDefault { name: String },

    #[error("Bare `*` must be followed by keyword-only parameters")]
    BareStarWithoutKeywords,

    #[error("Collector `{name}` cannot have a default")]
    DefaultOnCollector { name: String },
}

/// Parse a parameter list such as `self, a, b=1, *args, key=None, **kwargs`.
///
/// Also accepts a full header (`def run(self, a) -> int:` or `run(self, a)`).
/// Annotations and default values are skipped; only names, kinds, and whether
/// a default exists are kept. A `/` marker is accepted and ignored.
pub fn parse_params(text: &str) -> Result<Vec<Param>, ParseError> {
    let list = param_region(text)?;
    let commas = top_level(list, ',')?;

    let mut pieces = Vec::with_capacity(commas.len() + 1);
    let mut start = 0;
    for comma in commas {
        pieces.push(&list[start..comma]);
        start = comma + 1;
    }
    pieces.push(&list[start..]);

    let count = pieces.len();
    let mut params: Vec<Param> = Vec::with_capacity(count);
    let mut keyword_only = false;
    let mut seen_default = false;
    let mut seen_slash = false;
    let mut bare_star_at: Option<usize> = None;

    for (position, raw) in pieces.into_iter().enumerate() {
        let piece = raw.trim();
        if piece.is_empty() {
            // `()` and a single trailing comma are both fine.
            if count == 1 || (position + 1 == count && position > 0) {
                continue;
            }
            return Err(ParseError::EmptyParameter { position });
        }
        if params.last().is_some_and(|p| p.kind == ParamKind::VarKeyword) {
            return Err(ParseError::ParameterAfterVarKeyword {
                name: piece.to_string(),
            });
        }

        if piece == "/" {
            if seen_slash || keyword_only || params.is_empty() {
                return Err(ParseError::MisplacedSlash);
            }
            seen_slash = true;
            continue;
        }
        if piece == "*" {
            if keyword_only {
                return Err(ParseError::DuplicateStar);
            }
            keyword_only = true;
            bare_star_at = Some(params.len());
            continue;
        }
        if let Some(rest) = piece.strip_prefix("**") {
            let name = collector_name(rest)?;
            push_unique(&mut params, Param::var_keyword(name))?;
            continue;
        }
        if let Some(rest) = piece.strip_prefix('*') {
            if keyword_only {
                return Err(ParseError::DuplicateStar);
            }
            keyword_only = true;
            let name = collector_name(rest)?;
            push_unique(&mut params, Param::var_positional(name))?;
            continue;
        }

        let (name, has_default) = named_param(piece)?;
        if keyword_only {
            push_unique(&mut params, Param::keyword_only(name, has_default))?;
            continue;
        }
        if has_default {
            seen_default = true;
        } else if seen_default {
            return Err(ParseError::NonDefaultAfterDefault {
                name: name.to_string(),
            });
        }
        let param = if has_default {
            Param::with_default(name)
        } else {
            Param::positional(name)
        };
        push_unique(&mut params, param)?;
    }

    if let Some(at) = bare_star_at {
        if !params[at..].iter().any(|p| p.kind == ParamKind::KeywordOnly) {
            return Err(ParseError::BareStarWithoutKeywords);
        }
    }

    Ok(params)
}

fn push_unique(params: &mut Vec<Param>, param: Param) -> Result<(), ParseError> {
    if params.iter().any(|p| p.name == param.name) {
        return Err(ParseError::DuplicateParameter { name: param.name });
    }
    params.push(param);
    Ok(())
}

/// Strip an optional `def name(` ... `)` header down to the list inside.
fn param_region(text: &str) -> Result<&str, ParseError> {
    let trimmed = text.trim();
    let Some(open) = trimmed.find('(') else {
        return Ok(trimmed);
    };

    let head = trimmed[..open].trim();
    let head = head.strip_prefix("async ").unwrap_or(head).trim_start();
    let head = head.strip_prefix("def ").unwrap_or(head).trim();
    if !head.is_empty() && !is_identifier(head) {
        // `t=(1, 2)` and friends: the parenthesis belongs to a default.
        return Ok(trimmed);
    }

    let close = matching_close(trimmed, open).ok_or_else(|| ParseError::Unbalanced {
        text: trimmed.to_string(),
    })?;
    let rest = trimmed[close + 1..].trim();
    if !(rest.is_empty() || rest.starts_with("->") || rest.starts_with(':')) {
        return Err(ParseError::TrailingText {
            text: rest.to_string(),
        });
    }
    Ok(&trimmed[open + 1..close])
}

fn matching_close(s: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in s[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(open + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Byte offsets of `target` outside brackets and string literals.
fn top_level(s: &str, target: char) -> Result<Vec<usize>, ParseError> {
    let unbalanced = || ParseError::Unbalanced {
        text: s.to_string(),
    };
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut hits = Vec::new();

    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.checked_sub(1).ok_or_else(unbalanced)?,
            _ if c == target && depth == 0 => hits.push(i),
            _ => {}
        }
    }

    if depth != 0 || quote.is_some() {
        return Err(unbalanced());
    }
    Ok(hits)
}

/// `name[: annotation][= default]` -> (name, has_default)
fn named_param(piece: &str) -> Result<(&str, bool), ParseError> {
    let eq = top_level(piece, '=')?.first().copied();
    let declaration = eq.map_or(piece, |at| &piece[..at]);
    let name = declaration
        .split(':')
        .next()
        .unwrap_or(declaration)
        .trim();
    if !is_identifier(name) {
        return Err(ParseError::InvalidName {
            name: piece.to_string(),
        });
    }
    Ok((name, eq.is_some()))
}

fn collector_name(rest: &str) -> Result<&str, ParseError> {
    let (name, has_default) = named_param(rest)?;
    if has_default {
        return Err(ParseError::DefaultOnCollector {
            name: name.to_string(),
        });
    }
    Ok(name)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}
