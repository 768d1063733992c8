//! Text and manifest front-ends for pact.
//!
//! - [`params`] — parameter-list parsing (`self, a, b=1, *args, **kwargs`)
//! - [`manifest`] — JSON declaration manifests for configuration-driven classes

pub mod manifest;
pub mod params;

pub use manifest::{ClassDecl, Manifest, ManifestError, MethodDecl};
pub use params::{parse_params, ParseError};
