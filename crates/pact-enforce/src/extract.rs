use pact_core::class::Method;
use pact_core::types::{ContractError, ParamKind, Signature};

/// Normalize a method's declared parameters into a [`Signature`].
///
/// The receiver (first positional of an instance or class method) is elided.
/// Defaulted parameters count as plain positionals; keyword-only parameters
/// are not part of the positional sequence.
pub fn extract_signature(method: &Method) -> Result<Signature, ContractError> {
    let params = method
        .params
        .as_ref()
        .ok_or_else(|| ContractError::UninspectableCallable {
            method: method.name.clone(),
        })?;

    let mut params = params.iter().peekable();
    if method.kind.has_receiver() {
        params.next_if(|p| p.kind == ParamKind::Positional);
    }

    let mut signature = Signature::default();
    for param in params {
        match param.kind {
            ParamKind::Positional => signature.positional.push(param.name.clone()),
            ParamKind::VarPositional => signature.var_positional = true,
            ParamKind::VarKeyword => signature.var_keyword = true,
            ParamKind::KeywordOnly => {}
        }
    }
    Ok(signature)
}
