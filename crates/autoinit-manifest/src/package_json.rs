//! Package.json descriptor
//!
//! Deserializes the subset of `package.json` used for the dependency walk.
//! `dependencies` keeps the order the keys appear in the document, since the
//! walk visits dependencies in declaration order.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::ManifestParseError;

/// File name of a package manifest inside a package directory.
pub const MANIFEST_FILE: &str = "package.json";

/// The fields of a `package.json` the walk and the resolver read.
///
/// String fields holding another JSON type are treated as absent, so an
/// unusual but valid manifest never fails the walk.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub main: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub module: Option<String>,
    /// Raw `exports` value; interpreted by the resolver, not here.
    #[serde(default)]
    pub exports: Option<Value>,
    /// Dependency name to version constraint. Only the keys are walked.
    #[serde(default, deserialize_with = "deserialize_dependencies")]
    pub dependencies: IndexMap<String, String>,
    /// Path of the side-effect module, relative to the package root.
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub custom_auto_init: Option<String>,
}

impl PackageDescriptor {
    /// The package name, if present and non-empty.
    pub fn package_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// The declared auto-init path, if present and non-empty.
    pub fn auto_init(&self) -> Option<&str> {
        self.custom_auto_init
            .as_deref()
            .filter(|path| !path.is_empty())
    }

    /// Dependency names in declaration order.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.keys().map(String::as_str)
    }
}

/// Parse manifest text that was read from `path`.
///
/// `path` is only used to label errors.
pub fn parse_manifest_str(path: &Path, content: &str) -> Result<PackageDescriptor, ManifestParseError> {
    serde_json::from_str(content).map_err(|e| ManifestParseError::new(path, e))
}

fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

// `null` is treated like a missing field, and non-string constraints (git
// objects, numbers) are kept as their JSON text.
fn deserialize_dependencies<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(name, constraint)| {
            let constraint = match constraint {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (name, constraint)
        })
        .collect())
}
