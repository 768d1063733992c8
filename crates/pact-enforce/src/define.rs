use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use pact_core::class::{Class, InterfaceDefinition, Member, RequiredMethod};
use pact_core::types::ContractError;

use crate::extract::extract_signature;

/// Turn a class into an interface.
///
/// Every name visible through the resolution order is resolved the way
/// ordinary lookup would; those that resolve to a `require`-marked method are
/// recorded with their signature. Requirements declared on a defined base are
/// therefore inherited, and a plain redefinition in the class drops them.
pub fn define(class: Class) -> Result<Arc<Class>, ContractError> {
    let definition = required_methods(&class)?;
    tracing::debug!(
        interface = class.name(),
        required = ?definition.names(),
        "defined interface"
    );
    Ok(Arc::new(class.with_interface(definition)))
}

fn required_methods(class: &Class) -> Result<InterfaceDefinition, ContractError> {
    let visible: BTreeSet<&str> = class
        .resolution_order()
        .flat_map(|cls| cls.members().iter().map(Member::name))
        .collect();

    let mut required = BTreeMap::new();
    for name in visible {
        let Some((_, Member::Method(method))) = class.lookup(name) else {
            continue;
        };
        if !method.required {
            continue;
        }
        required.insert(
            name.to_string(),
            RequiredMethod {
                signature: extract_signature(method)?,
                doc: method.doc.clone(),
                classmethod: method.required_classmethod,
            },
        );
    }
    Ok(InterfaceDefinition::new(required))
}
