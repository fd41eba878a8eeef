//! Dependency walk
//!
//! Depth-first, pre-order walk over `dependencies`, starting at one manifest.
//! Each manifest is keyed by the path the resolver returned for it, loaded at
//! most once, and marked visited before its dependencies are expanded, so
//! diamonds and cycles terminate without reloading anything.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use autoinit_manifest::{FsManifestLoader, ManifestLoader, MANIFEST_FILE};
use autoinit_resolver::{ModuleId, Resolver};
use indexmap::IndexSet;
use serde::Serialize;

use crate::auto_init_set::AutoInitSet;
use crate::error::DiscoveryError;

/// A dependency edge whose target was still being expanded when the edge
/// was followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackEdge {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Result of one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Discovery {
    /// Auto-init module ids in first-discovery order.
    pub modules: Vec<ModuleId>,
    /// Manifests in the order they were loaded.
    pub visited: Vec<PathBuf>,
    pub cycles: Vec<BackEdge>,
}

/// Walk the graph rooted at `start` and collect its auto-init modules.
///
/// Any load or resolution failure aborts the walk.
pub fn discover<R, L>(start: &Path, resolver: &R, loader: &L) -> Result<Discovery, DiscoveryError>
where
    R: Resolver + ?Sized,
    L: ManifestLoader + ?Sized,
{
    let mut walker = Walker {
        resolver,
        loader,
        visited: IndexSet::new(),
        on_stack: HashSet::new(),
        modules: AutoInitSet::new(),
        cycles: Vec::new(),
    };
    walker.visit(start)?;

    tracing::debug!(
        start = %start.display(),
        manifests = walker.visited.len(),
        modules = walker.modules.len(),
        "auto-init discovery finished"
    );

    Ok(Discovery {
        modules: walker.modules.into_vec(),
        visited: walker.visited.into_iter().collect(),
        cycles: walker.cycles,
    })
}

/// [`discover`] against the filesystem, returning only the module ids.
pub fn discover_auto_init<R>(start: &Path, resolver: &R) -> Result<Vec<ModuleId>, DiscoveryError>
where
    R: Resolver + ?Sized,
{
    discover(start, resolver, &FsManifestLoader).map(|discovery| discovery.modules)
}

struct Walker<'a, R: ?Sized, L: ?Sized> {
    resolver: &'a R,
    loader: &'a L,
    visited: IndexSet<PathBuf>,
    /// Manifests whose dependencies are currently being expanded.
    on_stack: HashSet<PathBuf>,
    modules: AutoInitSet,
    cycles: Vec<BackEdge>,
}

impl<R, L> Walker<'_, R, L>
where
    R: Resolver + ?Sized,
    L: ManifestLoader + ?Sized,
{
    fn visit(&mut self, manifest: &Path) -> Result<(), DiscoveryError> {
        if !self.visited.insert(manifest.to_path_buf()) {
            return Ok(());
        }
        self.on_stack.insert(manifest.to_path_buf());

        let descriptor = self.loader.load(manifest)?;
        tracing::debug!(
            manifest = %manifest.display(),
            name = descriptor.package_name(),
            "visiting manifest"
        );

        if let Some(declared) = descriptor.auto_init() {
            let name = descriptor
                .package_name()
                .ok_or_else(|| DiscoveryError::MissingPackageName {
                    manifest: manifest.to_path_buf(),
                    declared: declared.to_string(),
                })?;

            // Resolved from the declaring package itself so its own
            // `exports` apply.
            let id = self
                .resolve(&format!("{name}/{declared}"), manifest)?
                .ok_or_else(|| DiscoveryError::AutoInitResolution {
                    manifest: manifest.to_path_buf(),
                    declared: declared.to_string(),
                })?;

            if self.modules.contains(id.as_str()) {
                tracing::debug!(%id, "auto-init module already registered");
            } else {
                tracing::debug!(%id, "registered auto-init module");
                self.modules.insert(id);
            }
        }

        for dependency in descriptor.dependency_names() {
            let dep_manifest = self
                .resolve(&format!("{dependency}/{MANIFEST_FILE}"), manifest)?
                .ok_or_else(|| DiscoveryError::DependencyResolution {
                    dependency: dependency.to_string(),
                    manifest: manifest.to_path_buf(),
                })?
                .to_path_buf();

            if self.on_stack.contains(&dep_manifest) {
                tracing::debug!(
                    from = %manifest.display(),
                    to = %dep_manifest.display(),
                    "dependency cycle"
                );
                self.cycles.push(BackEdge {
                    from: manifest.to_path_buf(),
                    to: dep_manifest.clone(),
                });
            }

            self.visit(&dep_manifest)?;
        }

        self.on_stack.remove(manifest);
        Ok(())
    }

    fn resolve(&self, specifier: &str, context: &Path) -> Result<Option<ModuleId>, DiscoveryError> {
        self.resolver
            .resolve(specifier, context)
            .map_err(|source| DiscoveryError::Resolver {
                specifier: specifier.to_string(),
                context: context.to_path_buf(),
                source,
            })
    }
}
