//! Manifest loading seam
//!
//! The walk loads manifests through [`ManifestLoader`] so it can run against
//! the filesystem or against an in-memory package set.

use std::fs;
use std::path::Path;

use crate::error::ManifestParseError;
use crate::package_json::{parse_manifest_str, PackageDescriptor};

/// Source of parsed manifests, keyed by manifest path.
pub trait ManifestLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<PackageDescriptor, ManifestParseError>;
}

/// Reads manifests from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsManifestLoader;

impl ManifestLoader for FsManifestLoader {
    fn load(&self, path: &Path) -> Result<PackageDescriptor, ManifestParseError> {
        tracing::trace!(path = %path.display(), "reading manifest");
        let content = fs::read_to_string(path).map_err(|e| ManifestParseError::new(path, e))?;
        parse_manifest_str(path, &content)
    }
}

impl<L: ManifestLoader + ?Sized> ManifestLoader for &L {
    fn load(&self, path: &Path) -> Result<PackageDescriptor, ManifestParseError> {
        (**self).load(path)
    }
}
