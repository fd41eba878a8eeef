//! Build-tool plugin surface for the auto-init aggregator.
//!
//! Importing [`AUTO_INIT_ID`] from a file yields a generated module that
//! imports, exactly once, every `customAutoInit` module declared anywhere in
//! the dependency graph of the package next to that file.
//!
//! The host drives two hooks: [`Plugin::resolve_id`] turns the request into a
//! virtual id that carries the starting manifest, and [`Plugin::load`] turns
//! that id into source.

pub mod entry;
pub mod error;
pub mod plugin;
pub mod virtual_id;

pub use entry::find_starting_manifest;
pub use error::PluginError;
pub use plugin::{AutoInitPlugin, Plugin, PluginConfig, AUTO_INIT_ID, PLUGIN_NAME};
pub use virtual_id::{VirtualId, VIRTUAL_PREFIX};
