//! Core descriptors, errors, and configuration for pact.
//!
//! This crate provides the data model shared by all pact crates:
//! - [`types`] — Parameters, signatures, discrepancies, and the error type
//! - [`class`] — Class and method descriptors with C3 resolution order
//! - [`config`] — Configuration loading from `.pact/pact.json`

pub mod class;
pub mod config;
pub mod types;
