//! Virtual module ids
//!
//! Shape: `\0auto-init?from=<manifest>&noext`. The leading NUL keeps the id
//! from ever naming a real file, `from` carries the starting manifest
//! (form-urlencoded, so any path round-trips), and `noext` stops the host's
//! extension-based transforms from treating the id as JSON.

use std::path::{Path, PathBuf};

use url::form_urlencoded;

use crate::error::PluginError;

pub const VIRTUAL_PREFIX: &str = "\0auto-init";

const FROM_KEY: &str = "from";
const NOEXT_KEY: &str = "noext";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualId {
    pub manifest: PathBuf,
}

impl VirtualId {
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }

    /// Whether `id` belongs to this plugin: the prefix followed by the end of
    /// the id or a query.
    pub fn matches(id: &str) -> bool {
        id.strip_prefix(VIRTUAL_PREFIX)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('?'))
    }

    pub fn encode(&self) -> Result<String, PluginError> {
        let manifest = path_str(&self.manifest)?;
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(FROM_KEY, manifest)
            .append_key_only(NOEXT_KEY)
            .finish();
        Ok(format!("{VIRTUAL_PREFIX}?{query}"))
    }

    /// Extract the manifest from an id accepted by [`VirtualId::matches`].
    pub fn parse(id: &str) -> Result<Self, PluginError> {
        let malformed = || PluginError::MalformedVirtualId { id: id.to_string() };

        if !Self::matches(id) {
            return Err(malformed());
        }
        let query = id[VIRTUAL_PREFIX.len()..].trim_start_matches('?');
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, value)| key == FROM_KEY && !value.is_empty())
            .map(|(_, value)| Self::new(value.into_owned()))
            .ok_or_else(malformed)
    }
}

fn path_str(path: &Path) -> Result<&str, PluginError> {
    path.to_str()
        .ok_or_else(|| PluginError::NonUtf8Path(path.to_path_buf()))
}
