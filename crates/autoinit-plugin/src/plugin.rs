//! Host hook implementation

use std::path::Path;

use autoinit_graph::generate_auto_init_imports;
use autoinit_manifest::{FsManifestLoader, ManifestLoader};
use autoinit_resolver::Resolver;

use crate::entry::find_starting_manifest;
use crate::error::PluginError;
use crate::virtual_id::VirtualId;

/// Request name that asks for the aggregated auto-init module.
pub const AUTO_INIT_ID: &str = "virtual:init-all-packages";

pub const PLUGIN_NAME: &str = "auto-init";

/// The two-phase hook contract of the host pipeline.
///
/// Both hooks return `Ok(None)` for ids the plugin does not handle, so the
/// host can try the next plugin.
pub trait Plugin {
    type Error: std::error::Error + Send + Sync + 'static;

    fn name(&self) -> &str;

    /// Map a request issued from `importer` to a virtual id.
    fn resolve_id(&self, id: &str, importer: Option<&Path>) -> Result<Option<String>, Self::Error>;

    /// Produce source for a virtual id returned by [`Plugin::resolve_id`].
    fn load(&self, id: &str) -> Result<Option<String>, Self::Error>;
}

/// Plugin settings.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    /// Request name the plugin answers to.
    pub request_name: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            request_name: AUTO_INIT_ID.to_string(),
        }
    }
}

/// Answers the auto-init request by walking the importer's package graph.
pub struct AutoInitPlugin<R, L = FsManifestLoader> {
    config: PluginConfig,
    resolver: R,
    loader: L,
}

impl<R: Resolver> AutoInitPlugin<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            config: PluginConfig::default(),
            resolver,
            loader: FsManifestLoader,
        }
    }
}

impl<R: Resolver, L: ManifestLoader> AutoInitPlugin<R, L> {
    pub fn with_config(mut self, config: PluginConfig) -> Self {
        self.config = config;
        self
    }

    /// Load manifests through `loader` instead of the filesystem.
    pub fn with_loader<L2: ManifestLoader>(self, loader: L2) -> AutoInitPlugin<R, L2> {
        AutoInitPlugin {
            config: self.config,
            resolver: self.resolver,
            loader,
        }
    }
}

impl<R: Resolver, L: ManifestLoader> Plugin for AutoInitPlugin<R, L> {
    type Error = PluginError;

    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn resolve_id(&self, id: &str, importer: Option<&Path>) -> Result<Option<String>, PluginError> {
        if id != self.config.request_name {
            return Ok(None);
        }

        let manifest = find_starting_manifest(importer)?;
        tracing::debug!(manifest = %manifest.display(), "auto-init aggregation requested");
        VirtualId::new(manifest).encode().map(Some)
    }

    fn load(&self, id: &str) -> Result<Option<String>, PluginError> {
        if !VirtualId::matches(id) {
            return Ok(None);
        }

        let virtual_id = VirtualId::parse(id)?;
        let code = generate_auto_init_imports(&virtual_id.manifest, &self.resolver, &self.loader)?;
        tracing::debug!(
            manifest = %virtual_id.manifest.display(),
            imports = code.lines().count(),
            "generated auto-init module"
        );
        Ok(Some(code))
    }
}
