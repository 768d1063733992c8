// Tests for the finality guard (C003)
use std::sync::Arc;

use pact_core::class::Class;
use pact_core::types::ContractError;
use pact_enforce::{define, implement, mark_final, strict};
use serde_json::Value;

use super::common::{class, method};

fn base_class() -> Arc<Class> {
    Arc::new(class(
        "BaseClass",
        vec![mark_final(
            method("method", "self").with_handler(|_| Ok(Value::from("original"))),
        )],
    ))
}

#[test]
/// Redefining a final method under `strict` fails, naming the declaring base.
fn test_strict_override_rejected() {
    let base = base_class();
    let err = strict(
        Class::builder("SubClass")
            .base(&base)
            .method(method("method", "self"))
            .build()
            .unwrap(),
    )
    .unwrap_err();
    match err {
        ContractError::FinalMethodOverride {
            method,
            declared_in,
            ..
        } => {
            assert_eq!(method, "method");
            assert_eq!(declared_in, "BaseClass");
        }
        other => panic!("expected FinalMethodOverride, got {other:?}"),
    }
}

#[test]
/// Subclassing without redefining the final method succeeds.
fn test_strict_without_override() {
    let base = base_class();
    let sub = strict(Class::builder("SubClass").base(&base).build().unwrap()).unwrap();
    assert_eq!(sub.call("method", &[]).unwrap(), Value::from("original"));
}

#[test]
/// `strict` on a class with no final ancestors is a no-op.
fn test_strict_without_final_ancestors() {
    let plain = Arc::new(class("Plain", vec![method("run", "self")]));
    let child = strict(
        Class::builder("Child")
            .base(&plain)
            .method(method("run", "self"))
            .build()
            .unwrap(),
    )
    .unwrap();
    assert_eq!(child.name(), "Child");
}

#[test]
/// A class may finalize its own methods under `strict`.
fn test_strict_own_final() {
    assert!(strict(class("FinalMixin", vec![mark_final(method("run", "self"))])).is_ok());
}

#[test]
/// An interface's final method cannot be redefined by an implementer, with or
/// without inheriting from the interface.
fn test_interface_final() {
    let final_iface = define(class(
        "FinalInterface",
        vec![mark_final(
            method("test", "self").with_handler(|_| Ok(Value::from("original"))),
        )],
    ))
    .unwrap();

    let err = implement(&[Arc::clone(&final_iface)])(class(
        "Belligerent",
        vec![method("test", "self")],
    ))
    .unwrap_err();
    assert_eq!(err.code(), "C003");

    let err = implement(&[Arc::clone(&final_iface)])(
        Class::builder("Belligerent")
            .base(&final_iface)
            .method(method("test", "self"))
            .build()
            .unwrap(),
    )
    .unwrap_err();
    assert_eq!(err.code(), "C003");

    let respectful = implement(&[Arc::clone(&final_iface)])(
        Class::builder("Respectful").base(&final_iface).build().unwrap(),
    )
    .unwrap();
    assert_eq!(respectful.call("test", &[]).unwrap(), Value::from("original"));
}

#[test]
/// A mixin that shadows a final method is caught through the interface.
fn test_sneaky_mixin() {
    let final_iface = define(class("FinalInterface", vec![mark_final(method("test", "self"))])).unwrap();
    let sneaky = Arc::new(class("SneakyMixin", vec![method("test", "self")]));
    let err = implement(&[final_iface])(
        Class::builder("SneakyBelligerent").base(&sneaky).build().unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, ContractError::FinalMethodOverride { .. }));
}

#[test]
/// Final methods on any base of an implementing class are protected too.
fn test_final_mixin_under_implement() {
    let final_iface = define(class("FinalInterface", vec![mark_final(method("test", "self"))])).unwrap();
    let final_mixin = Arc::new(class("FinalMixin", vec![mark_final(method("run", "self"))]));
    let err = implement(&[final_iface])(
        Class::builder("MixinBelligerent")
            .base(&final_mixin)
            .method(method("run", "self"))
            .build()
            .unwrap(),
    )
    .unwrap_err();
    match err {
        ContractError::FinalMethodOverride {
            method,
            declared_in,
            overridden_in,
        } => {
            assert_eq!(method, "run");
            assert_eq!(declared_in, "FinalMixin");
            assert_eq!(overridden_in, "MixinBelligerent");
        }
        other => panic!("expected FinalMethodOverride, got {other:?}"),
    }
}

#[test]
/// `require` and `final` compose: a final implementation of a required method.
fn test_required_and_final_compose() {
    let iface = super::common::interface("BehaviorInterface", "execute", "self");
    let behavior = implement(&[iface])(class(
        "NewBehavior",
        vec![mark_final(
            method("execute", "self").with_handler(|_| Ok(Value::from("new behavior value"))),
        )],
    ))
    .unwrap();
    assert!(strict(
        Class::builder("Derived")
            .base(&behavior)
            .method(method("execute", "self"))
            .build()
            .unwrap()
    )
    .is_err());
}
