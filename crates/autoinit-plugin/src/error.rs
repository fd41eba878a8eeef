//! Plugin errors

use std::path::PathBuf;

use autoinit_graph::DiscoveryError;

#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    #[error("Importer must be a real file{}", .importer.as_ref().map(|p| format!(" (got {})", p.display())).unwrap_or_default())]
    ImporterUnavailable { importer: Option<PathBuf> },

    #[error("Expected package.json file in {}", .dir.display())]
    ManifestNotFound { dir: PathBuf },

    #[error("Expected package.json path in virtual module id {id:?}")]
    MalformedVirtualId { id: String },

    #[error("Manifest path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
}
