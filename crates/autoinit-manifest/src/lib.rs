//! Package manifest loading for the auto-init aggregator.
//!
//! Reads `package.json` files into [`PackageDescriptor`] values. Only the
//! fields the dependency walk and the bundled resolver care about are kept;
//! everything else in the document is ignored.

pub mod error;
pub mod loader;
pub mod package_json;

pub use error::{ManifestErrorCause, ManifestParseError};
pub use loader::{FsManifestLoader, ManifestLoader};
pub use package_json::{parse_manifest_str, PackageDescriptor, MANIFEST_FILE};
