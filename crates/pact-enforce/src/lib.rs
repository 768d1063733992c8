//! Contract enforcement for pact class descriptors.
//!
//! Validates classes at registration time and fails immediately:
//! - C001: required method missing or not callable
//! - C002: required method present with an incompatible signature
//! - C003: final method redefined later in the lookup chain
//! - C004: parameters of a method cannot be introspected
//! - C005: required class method missing or not a class method
//! - C006: implementing a class that was never defined as an interface

pub mod compat;
pub mod define;
pub mod engine;
pub mod extract;
pub mod finality;
pub mod implement;
pub mod markers;

pub use compat::{check_signature, SignatureRules};
pub use define::define;
pub use engine::ContractEngine;
pub use extract::extract_signature;
pub use finality::{check_final, strict};
pub use implement::{implement, Validator};
pub use markers::{mark_final, require, require_classmethod};
