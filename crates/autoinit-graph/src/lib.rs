//! Auto-init discovery and import synthesis.
//!
//! Walks a package dependency graph from one manifest, collects the
//! canonical id of every `customAutoInit` module it finds, and renders the
//! resulting set as a module of side-effect imports.

pub mod auto_init_set;
pub mod discover;
pub mod error;
pub mod synthesize;

pub use auto_init_set::AutoInitSet;
pub use discover::{discover, discover_auto_init, BackEdge, Discovery};
pub use error::DiscoveryError;
pub use synthesize::{generate_auto_init_imports, synthesize};
