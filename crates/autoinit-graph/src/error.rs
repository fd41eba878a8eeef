//! Discovery errors

use std::path::PathBuf;

use autoinit_manifest::ManifestParseError;
use autoinit_resolver::ResolveError;

/// Every variant aborts the whole walk; a partial import list would silently
/// drop side effects.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    ManifestParse(#[from] ManifestParseError),

    #[error("Failed to locate package.json of dependency {dependency} from {}", .manifest.display())]
    DependencyResolution { dependency: String, manifest: PathBuf },

    #[error("Failed to locate auto init module {declared} from {}", .manifest.display())]
    AutoInitResolution { manifest: PathBuf, declared: String },

    #[error("Package at {} declares customAutoInit {declared} but has no name", .manifest.display())]
    MissingPackageName { manifest: PathBuf, declared: String },

    #[error("Resolver failed for {specifier} from {}: {source}", .context.display())]
    Resolver {
        specifier: String,
        context: PathBuf,
        #[source]
        source: ResolveError,
    },
}

impl DiscoveryError {
    /// The manifest the failure is attributed to.
    pub fn manifest(&self) -> &std::path::Path {
        match self {
            Self::ManifestParse(err) => &err.path,
            Self::DependencyResolution { manifest, .. }
            | Self::AutoInitResolution { manifest, .. }
            | Self::MissingPackageName { manifest, .. } => manifest,
            Self::Resolver { context, .. } => context,
        }
    }
}
