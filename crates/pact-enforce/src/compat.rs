use pact_core::config::SignatureConfig;
use pact_core::types::{Discrepancy, Signature};

/// Knobs for [`check_signature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureRules {
    pub strict_var_keyword: bool,
    pub absorb_with_var_positional: bool,
}

impl Default for SignatureRules {
    fn default() -> Self {
        Self {
            strict_var_keyword: true,
            absorb_with_var_positional: true,
        }
    }
}

impl From<&SignatureConfig> for SignatureRules {
    fn from(config: &SignatureConfig) -> Self {
        Self {
            strict_var_keyword: config.strict_var_keyword,
            absorb_with_var_positional: config.absorb_with_var_positional,
        }
    }
}

/// Compare a candidate signature against the required one. Returns every
/// discrepancy found; an empty list means the candidate is compatible.
///
/// The candidate's positionals must be a prefix of the required ones. Required
/// positionals past the candidate's list are absorbed by a candidate `*args`.
/// Required collectors must be matched by the same collector.
pub fn check_signature(
    required: &Signature,
    candidate: &Signature,
    rules: SignatureRules,
) -> Vec<Discrepancy> {
    let mut discrepancies = Vec::new();

    for (position, found) in candidate.positional.iter().enumerate() {
        match required.positional.get(position) {
            Some(expected) if expected == found => {}
            Some(expected) => discrepancies.push(Discrepancy::ParameterMismatch {
                position,
                expected: expected.clone(),
                found: found.clone(),
            }),
            None => discrepancies.push(Discrepancy::UnexpectedParameter {
                name: found.clone(),
            }),
        }
    }

    let absorbed = rules.absorb_with_var_positional && candidate.var_positional;
    if !absorbed {
        for name in required.positional.iter().skip(candidate.positional.len()) {
            discrepancies.push(Discrepancy::MissingParameter { name: name.clone() });
        }
    }

    if required.var_positional && !candidate.var_positional {
        discrepancies.push(Discrepancy::MissingVarPositional);
    }
    if required.var_keyword && !candidate.var_keyword {
        discrepancies.push(Discrepancy::MissingVarKeyword);
    }
    if rules.strict_var_keyword && candidate.var_keyword && !required.var_keyword {
        discrepancies.push(Discrepancy::UnexpectedVarKeyword);
    }

    discrepancies
}
