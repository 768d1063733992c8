// End-to-end: JSON manifest on disk -> ContractEngine registration
use std::fs;

use pact_core::types::ContractError;
use pact_enforce::ContractEngine;
use pact_parsers::Manifest;
use serde_json::json;

fn write_manifest(dir: &tempfile::TempDir, value: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join("classes.json");
    fs::write(&path, value.to_string()).unwrap();
    path
}

#[test]
/// The duck scenario loads from disk and every class is registered in order.
fn test_duck_manifest_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(
        &dir,
        json!({
            "classes": [
                {
                    "name": "DuckInterface",
                    "interface": true,
                    "methods": [ { "name": "quack", "params": "self", "require": true } ]
                },
                {
                    "name": "Tree",
                    "implements": ["DuckInterface"],
                    "methods": [ { "name": "quack", "params": "def quack(self) -> None:" } ],
                    "data": { "leaves": 120 }
                },
                {
                    "name": "Oak",
                    "bases": ["Tree"],
                    "implements": ["DuckInterface"],
                    "strict": true
                }
            ]
        }),
    );

    let manifest = Manifest::from_path(&path).unwrap();
    let mut engine = ContractEngine::new();
    assert_eq!(engine.load_manifest(&manifest).unwrap(), 3);
    assert_eq!(engine.names(), ["DuckInterface", "Tree", "Oak"]);

    let oak = engine.get("Oak").unwrap();
    assert!(oak.call("quack", &[]).is_ok());
    assert!(oak.call("leaves", &[]).is_err());
    assert_eq!(oak.attribute("leaves"), Some(&json!(120)));
    assert_eq!(oak.attribute("quack"), None);
}

#[test]
/// A violation part-way through aborts the load at that class.
fn test_manifest_aborts_on_final_override() {
    let manifest = Manifest::from_json(
        &json!({
            "classes": [
                {
                    "name": "BaseClass",
                    "methods": [ { "name": "method", "params": "self", "final": true } ]
                },
                {
                    "name": "SubClass",
                    "bases": ["BaseClass"],
                    "strict": true,
                    "methods": [ { "name": "method", "params": "self" } ]
                },
                { "name": "After" }
            ]
        })
        .to_string(),
    )
    .unwrap();

    let mut engine = ContractEngine::new();
    let err = engine.load_manifest(&manifest).unwrap_err();
    match err {
        ContractError::FinalMethodOverride {
            declared_in,
            overridden_in,
            ..
        } => {
            assert_eq!(declared_in, "BaseClass");
            assert_eq!(overridden_in, "SubClass");
        }
        other => panic!("expected FinalMethodOverride, got {other:?}"),
    }
    assert_eq!(engine.names(), ["BaseClass"]);
}

#[test]
/// A native method declared without params cannot satisfy a requirement.
fn test_manifest_native_method() {
    let manifest = Manifest::from_json(
        &json!({
            "classes": [
                {
                    "name": "Sized",
                    "interface": true,
                    "methods": [ { "name": "size", "params": "self", "require": true } ]
                },
                {
                    "name": "Builtin",
                    "implements": ["Sized"],
                    "methods": [ { "name": "size" } ]
                }
            ]
        })
        .to_string(),
    )
    .unwrap();
    let err = ContractEngine::new().load_manifest(&manifest).unwrap_err();
    assert_eq!(err.code(), "C004");
}

#[test]
/// An inconsistent base order is rejected before any contract check.
fn test_manifest_inconsistent_hierarchy() {
    let manifest = Manifest::from_json(
        &json!({
            "classes": [
                { "name": "A" },
                { "name": "B", "bases": ["A"] },
                { "name": "X", "bases": ["A", "B"] }
            ]
        })
        .to_string(),
    )
    .unwrap();
    let err = ContractEngine::new().load_manifest(&manifest).unwrap_err();
    assert!(matches!(err, ContractError::InconsistentHierarchy { .. }));
}
