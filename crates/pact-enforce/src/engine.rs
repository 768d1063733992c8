use std::collections::HashMap;
use std::sync::Arc;

use pact_core::class::Class;
use pact_core::config::PactConfig;
use pact_core::types::ContractError;
use pact_parsers::manifest::{ClassDecl, Manifest};

use crate::define::define;
use crate::finality::check_final;
use crate::implement::Validator;
use crate::markers::{mark_final, require, require_classmethod};

/// Registry of declared classes. Owns every class it registers; interface
/// definitions are read-only once registered.
#[derive(Debug, Default)]
pub struct ContractEngine {
    classes: HashMap<String, Arc<Class>>,
    order: Vec<String>,
    validator: Validator,
}

impl ContractEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine configured from a `PactConfig`.
    pub fn with_config(config: &PactConfig) -> Self {
        Self {
            validator: Validator::with_config(config),
            ..Self::default()
        }
    }

    /// Build, validate, and register one class declaration.
    ///
    /// Bases and interfaces must already be registered. Nothing is registered
    /// when any check fails.
    pub fn declare(&mut self, decl: &ClassDecl) -> Result<Arc<Class>, ContractError> {
        if self.classes.contains_key(&decl.name) {
            return Err(ContractError::DuplicateClass {
                name: decl.name.clone(),
            });
        }

        let mut builder = Class::builder(decl.name.clone());
        for base in &decl.bases {
            builder = builder.base(self.resolve(base)?);
        }
        for method_decl in &decl.methods {
            let mut method =
                method_decl
                    .to_method()
                    .map_err(|e| ContractError::InvalidParams {
                        method: format!("{}.{}", decl.name, method_decl.name),
                        message: e.to_string(),
                    })?;
            if method_decl.require_classmethod {
                method = require_classmethod(method);
            } else if method_decl.require {
                method = require(method);
            }
            if method_decl.is_final {
                method = mark_final(method);
            }
            builder = builder.method(method);
        }
        for (name, value) in &decl.data {
            builder = builder.data(name.clone(), value.clone());
        }
        let class = builder.build()?;

        for interface in &decl.implements {
            let interface = Arc::clone(self.resolve(interface)?);
            self.validator.check(&interface, &class)?;
        }
        if decl.strict {
            check_final(None, &class)?;
        }

        let class = if decl.interface {
            define(class)?
        } else {
            Arc::new(class)
        };

        self.order.push(decl.name.clone());
        self.classes.insert(decl.name.clone(), Arc::clone(&class));
        Ok(class)
    }

    /// Declare every class in order, stopping at the first failure. Classes
    /// declared before the failure stay registered.
    pub fn load_manifest(&mut self, manifest: &Manifest) -> Result<usize, ContractError> {
        for decl in &manifest.classes {
            self.declare(decl)?;
        }
        tracing::info!(classes = manifest.classes.len(), "manifest loaded");
        Ok(manifest.classes.len())
    }

    /// Register an already-built class under its own name.
    pub fn register(&mut self, class: Arc<Class>) -> Result<(), ContractError> {
        let name = class.name().to_string();
        if self.classes.contains_key(&name) {
            return Err(ContractError::DuplicateClass { name });
        }
        self.order.push(name.clone());
        self.classes.insert(name, class);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Class>> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered interfaces, in registration order.
    pub fn interfaces(&self) -> Vec<&Arc<Class>> {
        self.order
            .iter()
            .filter_map(|name| self.classes.get(name))
            .filter(|class| class.is_interface())
            .collect()
    }

    /// Registered class names, in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn resolve(&self, name: &str) -> Result<&Arc<Class>, ContractError> {
        self.classes
            .get(name)
            .ok_or_else(|| ContractError::UnknownClass {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
