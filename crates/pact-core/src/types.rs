use serde::{Deserialize, Serialize};

/// How a declared parameter binds call arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    /// Plain positional-or-keyword parameter, with or without a default.
    Positional,
    /// The `*args` collector.
    VarPositional,
    /// Declared after `*` or `*args`; only bindable by keyword.
    KeywordOnly,
    /// The `**kwargs` collector.
    VarKeyword,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::Positional => "positional",
            ParamKind::VarPositional => "var_positional",
            ParamKind::KeywordOnly => "keyword_only",
            ParamKind::VarKeyword => "var_keyword",
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single declared parameter. Default values are never modelled, only
/// whether one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    #[serde(default)]
    pub has_default: bool,
}

impl Param {
    pub fn positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            has_default: false,
        }
    }

    pub fn with_default(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Positional,
            has_default: true,
        }
    }

    pub fn var_positional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::VarPositional,
            has_default: false,
        }
    }

    pub fn keyword_only(name: impl Into<String>, has_default: bool) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::KeywordOnly,
            has_default,
        }
    }

    pub fn var_keyword(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::VarKeyword,
            has_default: false,
        }
    }
}

/// Normalized call shape of a method: positional names in declared order
/// (receiver elided) plus the two variadic collector flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Signature {
    pub positional: Vec<String>,
    #[serde(default)]
    pub var_positional: bool,
    #[serde(default)]
    pub var_keyword: bool,
}

impl Signature {
    pub fn new<I, S>(positional: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            positional: positional.into_iter().map(Into::into).collect(),
            var_positional: false,
            var_keyword: false,
        }
    }

    pub fn with_var_positional(mut self) -> Self {
        self.var_positional = true;
        self
    }

    pub fn with_var_keyword(mut self) -> Self {
        self.var_keyword = true;
        self
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts: Vec<String> = self.positional.clone();
        if self.var_positional {
            parts.push("*args".to_string());
        }
        if self.var_keyword {
            parts.push("**kwargs".to_string());
        }
        write!(f, "({})", parts.join(", "))
    }
}

/// One specific way a candidate signature fails to satisfy a required one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Discrepancy {
    /// A required positional parameter has no counterpart and no `*args` absorbs it.
    MissingParameter { name: String },
    /// The candidate declares a positional parameter past the end of the required list.
    UnexpectedParameter { name: String },
    /// Same position, different name.
    ParameterMismatch {
        position: usize,
        expected: String,
        found: String,
    },
    MissingVarPositional,
    MissingVarKeyword,
    /// The candidate accepts `**kwargs` the interface never declared.
    UnexpectedVarKeyword,
}

impl std::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discrepancy::MissingParameter { name } => {
                write!(f, "missing parameter `{name}`")
            }
            Discrepancy::UnexpectedParameter { name } => {
                write!(f, "unexpected extra parameter `{name}`")
            }
            Discrepancy::ParameterMismatch {
                position,
                expected,
                found,
            } => write!(
                f,
                "parameter {position} is `{found}`, expected `{expected}`"
            ),
            Discrepancy::MissingVarPositional => f.write_str("missing `*args` collector"),
            Discrepancy::MissingVarKeyword => f.write_str("missing `**kwargs` collector"),
            Discrepancy::UnexpectedVarKeyword => {
                f.write_str("declares `**kwargs` the interface does not")
            }
        }
    }
}

fn join_discrepancies(discrepancies: &[Discrepancy]) -> String {
    discrepancies
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn doc_suffix(doc: &Option<String>) -> String {
    match doc {
        Some(doc) => format!(" ({doc})"),
        None => String::new(),
    }
}

/// Errors raised while defining, implementing, or registering classes.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("`{class}` is missing method `{method}` required by `{interface}`{}", doc_suffix(.doc))]
    MissingRequiredAttribute {
        class: String,
        interface: String,
        method: String,
        doc: Option<String>,
    },

    #[error(
        "`{class}` method `{method}` does not match `{interface}`: expected {expected}, found {found}: {}",
        join_discrepancies(.discrepancies)
    )]
    InvalidMethodSignature {
        class: String,
        interface: String,
        method: String,
        expected: Signature,
        found: Signature,
        discrepancies: Vec<Discrepancy>,
    },

    #[error("Method `{method}` is final in `{declared_in}` and cannot be overridden in `{overridden_in}`")]
    FinalMethodOverride {
        method: String,
        declared_in: String,
        overridden_in: String,
    },

    #[error("Parameters of `{method}` cannot be introspected")]
    UninspectableCallable { method: String },

    #[error("`{class}` must provide `{method}` as a class method, as required by `{interface}`")]
    MissingRequiredClassMethod {
        class: String,
        interface: String,
        method: String,
    },

    #[error("`{interface}` was never defined as an interface")]
    InvalidInterface { interface: String },

    #[error("Cannot create a consistent method resolution order for `{class}`")]
    InconsistentHierarchy { class: String },

    #[error("Unknown class: {name}")]
    UnknownClass { name: String },

    #[error("Class already declared: {name}")]
    DuplicateClass { name: String },

    #[error("`{class}` has no callable attribute `{method}`")]
    NoSuchMethod { class: String, method: String },

    #[error("Invalid parameter list for `{method}`: {message}")]
    InvalidParams { method: String, message: String },
}

impl ContractError {
    /// Stable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::MissingRequiredAttribute { .. } => "C001",
            ContractError::InvalidMethodSignature { .. } => "C002",
            ContractError::FinalMethodOverride { .. } => "C003",
            ContractError::UninspectableCallable { .. } => "C004",
            ContractError::MissingRequiredClassMethod { .. } => "C005",
            ContractError::InvalidInterface { .. } => "C006",
            ContractError::InconsistentHierarchy { .. } => "C007",
            ContractError::UnknownClass { .. } => "C008",
            ContractError::DuplicateClass { .. } => "C009",
            ContractError::NoSuchMethod { .. } => "C010",
            ContractError::InvalidParams { .. } => "C011",
        }
    }
}
