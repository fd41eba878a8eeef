//! Canonical module identifiers

use std::borrow::Borrow;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ResolveError;

/// A resolver-produced identifier for a module.
///
/// Two specifiers that reach the same logical module must produce equal ids;
/// the auto-init set deduplicates on this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_path(path: &Path) -> Result<Self, ResolveError> {
        path.to_str()
            .map(Self::new)
            .ok_or_else(|| ResolveError::NonUtf8Path(path.to_path_buf()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the id as a filesystem path.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
