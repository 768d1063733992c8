use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pact_core::class::{Method, MethodKind};
use serde::{Deserialize, Serialize};

use crate::params::{parse_params, ParseError};

/// An ordered list of class declarations, registered top to bottom.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub classes: Vec<ClassDecl>,
}

/// One class as written in a manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub bases: Vec<String>,
    /// Run `define` on the class.
    #[serde(default)]
    pub interface: bool,
    /// Interfaces the class must satisfy.
    #[serde(default)]
    pub implements: Vec<String>,
    /// Run the finality guard on the class.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
    /// Non-callable attributes and their values.
    #[serde(default)]
    pub data: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub kind: MethodKind,
    /// Parameter list text; absent for natively implemented callables.
    #[serde(default)]
    pub params: Option<String>,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub require: bool,
    #[serde(default)]
    pub require_classmethod: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
}

impl Manifest {
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }
}

impl MethodDecl {
    /// Build the unmarked method descriptor. Markers (`require`, `final`) are
    /// applied by the caller.
    pub fn to_method(&self) -> Result<Method, ParseError> {
        let mut method = match &self.params {
            Some(text) => Method::new(self.name.clone(), parse_params(text)?),
            None => Method::native(self.name.clone()),
        };
        method = method.with_kind(self.kind);
        if let Some(doc) = &self.doc {
            method = method.with_doc(doc.clone());
        }
        Ok(method)
    }
}
