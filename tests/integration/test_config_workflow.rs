// Configuration loaded from `.pact/pact.json` changes validation outcomes
use std::fs;

use pact_core::config::PactConfig;
use pact_enforce::ContractEngine;
use pact_parsers::Manifest;
use serde_json::json;

fn handler_manifest() -> Manifest {
    Manifest::from_json(
        &json!({
            "classes": [
                {
                    "name": "Handler",
                    "interface": true,
                    "methods": [
                        { "name": "handle", "params": "self, event, context", "require": true }
                    ]
                },
                {
                    "name": "Flexible",
                    "implements": ["Handler"],
                    "methods": [ { "name": "handle", "params": "self, event, *rest, **options" } ]
                }
            ]
        })
        .to_string(),
    )
    .unwrap()
}

#[test]
/// Defaults reject the undeclared `**options` collector.
fn test_default_config_is_conservative() {
    let dir = tempfile::tempdir().unwrap();
    let config = PactConfig::load(dir.path());
    let err = ContractEngine::with_config(&config)
        .load_manifest(&handler_manifest())
        .unwrap_err();
    assert_eq!(err.code(), "C002");
}

#[test]
/// Relaxing `strict_var_keyword` on disk lets the same manifest load.
fn test_relaxed_config_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("pact.json"),
        json!({ "signature": { "strict_var_keyword": false } }).to_string(),
    )
    .unwrap();
    let config = PactConfig::load(dir.path());
    let mut engine = ContractEngine::with_config(&config);
    assert_eq!(engine.load_manifest(&handler_manifest()).unwrap(), 2);
}

#[test]
/// Turning absorption off makes `*rest` no longer stand in for `context`.
fn test_absorption_disabled_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("pact.json"),
        json!({
            "signature": { "strict_var_keyword": false, "absorb_with_var_positional": false }
        })
        .to_string(),
    )
    .unwrap();
    let config = PactConfig::load(dir.path());
    let err = ContractEngine::with_config(&config)
        .load_manifest(&handler_manifest())
        .unwrap_err();
    assert!(err.to_string().contains("missing parameter `context`"));
}
