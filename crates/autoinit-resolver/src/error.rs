//! Resolver error types

use std::io;
use std::path::PathBuf;

use autoinit_manifest::ManifestParseError;

/// A failure of the resolver itself.
///
/// "Not found" is not an error; resolvers report it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Manifest(#[from] ManifestParseError),
    #[error("Failed to canonicalize path {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Resolved path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    /// Raised by host-provided resolvers.
    #[error("{0}")]
    Host(String),
}

impl ResolveError {
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host(message.into())
    }
}
