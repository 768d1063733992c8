// Tests for interfaces derived from other interfaces
use std::sync::Arc;

use pact_core::class::Class;
use pact_core::types::ContractError;
use pact_enforce::{define, implement, require};

use super::common::{class, interface, method};

#[test]
/// A derived interface requires its own methods plus its base's.
fn test_inherited_interface_gains_rules() {
    let string_iface = interface("StringInterface", "execute", "self, argument");
    let inherited = define(
        Class::builder("InheritedInterface")
            .base(&string_iface)
            .method(require(method("run", "self")).with_doc("Must implement run."))
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(inherited.interface().unwrap().names(), vec!["execute", "run"]);

    let err = implement(&[Arc::clone(&inherited)])(class(
        "UsesInheritedInterface",
        vec![method("run", "self")],
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        ContractError::MissingRequiredAttribute { ref method, .. } if method == "execute"
    ));

    assert!(implement(&[inherited])(class(
        "Complete",
        vec![method("run", "self"), method("execute", "self, argument")],
    ))
    .is_ok());
}

#[test]
/// Redeclaring a required method as required again replaces its signature.
fn test_derived_interface_narrows_signature() {
    let base = interface("Base", "run", "self, a");
    let derived = define(
        Class::builder("Derived")
            .base(&base)
            .method(require(method("run", "self, a, b")))
            .build()
            .unwrap(),
    )
    .unwrap();
    let required = derived.interface().unwrap().get("run").unwrap();
    assert_eq!(required.signature.positional, vec!["a", "b"]);
}

#[test]
/// The base interface's definition is untouched by deriving from it.
fn test_base_definition_unchanged() {
    let base = interface("Base", "run", "self");
    let _derived = define(
        Class::builder("Derived")
            .base(&base)
            .method(require(method("walk", "self")))
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(base.interface().unwrap().names(), vec!["run"]);
}
