use std::sync::Arc;

use pact_core::class::{Class, Member, MethodKind};
use pact_core::config::PactConfig;
use pact_core::types::ContractError;

use crate::compat::{check_signature, SignatureRules};
use crate::extract::extract_signature;
use crate::finality::check_final;

/// Validates candidate classes against interface definitions.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    pub rules: SignatureRules,
    /// Also run the finality check with each interface prepended to the chain.
    pub interface_finals: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: SignatureRules::default(),
            interface_finals: true,
        }
    }
}

impl Validator {
    pub fn with_config(config: &PactConfig) -> Self {
        Self {
            rules: SignatureRules::from(&config.signature),
            interface_finals: config.enforce.interface_finals,
        }
    }

    /// Check `class` against each interface in order, then hand it back frozen.
    pub fn implement(
        &self,
        interfaces: &[Arc<Class>],
        class: Class,
    ) -> Result<Arc<Class>, ContractError> {
        for interface in interfaces {
            self.check(interface, &class)?;
        }
        Ok(Arc::new(class))
    }

    /// Run every check for one interface without taking ownership.
    pub fn check(&self, interface: &Class, class: &Class) -> Result<(), ContractError> {
        self.check_required(interface, class)?;
        if self.interface_finals {
            check_final(Some(interface), class)?;
        }
        tracing::debug!(
            class = class.name(),
            interface = interface.name(),
            "implementation validated"
        );
        Ok(())
    }

    fn check_required(&self, interface: &Class, class: &Class) -> Result<(), ContractError> {
        let definition = interface
            .interface()
            .ok_or_else(|| ContractError::InvalidInterface {
                interface: interface.name().to_string(),
            })?;

        for (name, required) in definition.iter() {
            let missing = || {
                if required.classmethod {
                    ContractError::MissingRequiredClassMethod {
                        class: class.name().to_string(),
                        interface: interface.name().to_string(),
                        method: name.to_string(),
                    }
                } else {
                    ContractError::MissingRequiredAttribute {
                        class: class.name().to_string(),
                        interface: interface.name().to_string(),
                        method: name.to_string(),
                        doc: required.doc.clone(),
                    }
                }
            };

            // An inherited `require` stub is not an implementation.
            let method = match class.lookup(name) {
                Some((_, Member::Method(method))) if !method.required => method,
                _ => return Err(missing()),
            };
            if required.classmethod && method.kind != MethodKind::Class {
                return Err(missing());
            }

            let found = extract_signature(method)?;
            let discrepancies = check_signature(&required.signature, &found, self.rules);
            if !discrepancies.is_empty() {
                return Err(ContractError::InvalidMethodSignature {
                    class: class.name().to_string(),
                    interface: interface.name().to_string(),
                    method: name.to_string(),
                    expected: required.signature.clone(),
                    found,
                    discrepancies,
                });
            }
        }
        Ok(())
    }
}

/// Decorator factory: returns a function that validates a class against every
/// interface in `interfaces` and, on success, returns it frozen.
pub fn implement(
    interfaces: &[Arc<Class>],
) -> impl Fn(Class) -> Result<Arc<Class>, ContractError> + '_ {
    move |class| Validator::default().implement(interfaces, class)
}
