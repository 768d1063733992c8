use std::collections::HashMap;
use std::sync::Arc;

use pact_core::class::Class;
use pact_core::types::ContractError;

/// Reject a class that redefines a `final` method anywhere in its lookup chain.
///
/// Applying this to a class with no final ancestors always succeeds. A
/// violation by an unchecked intermediate base is reported against that base.
pub fn strict(class: Class) -> Result<Arc<Class>, ContractError> {
    check_final(None, &class)?;
    tracing::debug!(class = class.name(), "strict check passed");
    Ok(Arc::new(class))
}

/// Walk the lookup chain (root ancestors first, `class` last). Once a class in
/// the chain declares a method `final`, no later class may declare that name.
///
/// When `interface` is given and is not already an ancestor of `class`, it is
/// placed at the front of the chain so its finals bind the candidate too.
pub fn check_final(interface: Option<&Class>, class: &Class) -> Result<(), ContractError> {
    let mut chain: Vec<&Class> = class.resolution_order().rev().collect();
    if let Some(interface) = interface {
        if !class.inherits_from(interface) {
            chain.insert(0, interface);
        }
    }

    let mut finals: HashMap<&str, &str> = HashMap::new();
    for cls in chain {
        for method in cls.methods() {
            if let Some(declared_in) = finals.get(method.name.as_str()) {
                return Err(ContractError::FinalMethodOverride {
                    method: method.name.clone(),
                    declared_in: declared_in.to_string(),
                    overridden_in: cls.name().to_string(),
                });
            }
            if method.is_final {
                finals.insert(method.name.as_str(), cls.name());
            }
        }
    }
    Ok(())
}
