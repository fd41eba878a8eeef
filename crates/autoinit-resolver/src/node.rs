//! Node-style package resolution
//!
//! Resolves specifiers the way Node and bundlers built on it do:
//! 1. Relative and absolute specifiers are probed against the filesystem
//! 2. Bare specifiers look for the package by self-reference first, then in
//!    `node_modules` of every ancestor directory
//! 3. Inside the package, `exports` decides what is reachable; without it the
//!    subpath (or `module`/`main`/`index`) is probed directly
//!
//! Found files are canonicalized so the same file reached through different
//! symlinks yields one id.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use autoinit_manifest::{FsManifestLoader, ManifestLoader, PackageDescriptor, MANIFEST_FILE};

use crate::error::ResolveError;
use crate::exports::resolve_exports;
use crate::module_id::ModuleId;
use crate::resolver::Resolver;
use crate::specifier::{normalize_subpath, split_package_specifier};

/// Knobs for [`NodeResolver`].
#[derive(Debug, Clone)]
pub struct ResolverOptions {
    /// Export conditions, in addition to `default` which always applies.
    pub conditions: Vec<String>,
    /// Extensions appended when a path does not name a file as written.
    pub extensions: Vec<String>,
    /// Keep symlinked paths instead of canonicalizing them.
    pub preserve_symlinks: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            conditions: ["import", "module", "browser"].map(String::from).to_vec(),
            extensions: [".mjs", ".js", ".mts", ".ts", ".jsx", ".tsx", ".json"]
                .map(String::from)
                .to_vec(),
            preserve_symlinks: false,
        }
    }
}

/// Resolver following Node's package lookup rules on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct NodeResolver {
    options: ResolverOptions,
}

impl NodeResolver {
    pub fn new(options: ResolverOptions) -> Self {
        Self { options }
    }

    fn resolve_bare(&self, specifier: &str, base_dir: &Path) -> Result<Option<ModuleId>, ResolveError> {
        let Some((package_name, subpath)) = split_package_specifier(specifier) else {
            return Ok(None);
        };
        let subpath = match subpath.map(normalize_subpath) {
            Some(Some(normalized)) => normalized,
            Some(None) => return Ok(None),
            None => String::new(),
        };

        if let Some(package_dir) = self.find_self_reference(package_name, base_dir)? {
            return self.resolve_in_package(&package_dir, &subpath);
        }

        // A directory with a manifest owns the name. An empty or manifest-less
        // directory only wins if something resolves inside it; otherwise the
        // search moves on to the next ancestor.
        for dir in base_dir.ancestors() {
            if dir.file_name().is_some_and(|name| name == "node_modules") {
                continue;
            }
            let candidate = dir.join("node_modules").join(package_name);
            if !candidate.is_dir() {
                continue;
            }
            if candidate.join(MANIFEST_FILE).is_file() {
                return self.resolve_in_package(&candidate, &subpath);
            }
            if let Some(found) = self.resolve_in_package(&candidate, &subpath)? {
                return Ok(Some(found));
            }
            tracing::trace!(candidate = %candidate.display(), "no manifest, continuing upwards");
        }

        Ok(None)
    }

    /// The nearest enclosing package, if it is named `package_name`.
    fn find_self_reference(&self, package_name: &str, base_dir: &Path) -> Result<Option<PathBuf>, ResolveError> {
        let Some(dir) = base_dir.ancestors().find(|dir| dir.join(MANIFEST_FILE).is_file()) else {
            return Ok(None);
        };
        let descriptor = FsManifestLoader.load(&dir.join(MANIFEST_FILE))?;
        Ok((descriptor.package_name() == Some(package_name)).then(|| dir.to_path_buf()))
    }

    /// Resolve a normalized subpath (empty for the package root).
    fn resolve_in_package(&self, package_dir: &Path, subpath: &str) -> Result<Option<ModuleId>, ResolveError> {
        let manifest_path = package_dir.join(MANIFEST_FILE);

        // Manifests are always reachable, whatever `exports` says.
        if subpath == MANIFEST_FILE {
            return if manifest_path.is_file() {
                self.finish(&manifest_path)
            } else {
                Ok(None)
            };
        }

        let descriptor = if manifest_path.is_file() {
            FsManifestLoader.load(&manifest_path)?
        } else {
            PackageDescriptor::default()
        };

        if let Some(exports) = &descriptor.exports {
            let key = if subpath.is_empty() {
                ".".to_string()
            } else {
                format!("./{subpath}")
            };
            let Some(target) = resolve_exports(exports, &key, &self.options.conditions) else {
                tracing::trace!(package = %package_dir.display(), subpath = %key, "not exported");
                return Ok(None);
            };
            let target = package_dir.join(target.trim_start_matches("./"));
            return if target.is_file() {
                self.finish(&target)
            } else {
                Ok(None)
            };
        }

        if !subpath.is_empty() {
            return self.probe(&package_dir.join(subpath));
        }

        for entry in [&descriptor.module, &descriptor.main].into_iter().flatten() {
            if let Some(found) = self.probe(&package_dir.join(entry))? {
                return Ok(Some(found));
            }
        }
        self.probe(&package_dir.join("index"))
    }

    /// Try `target` as a file, then with each extension, then as a directory
    /// containing an index file.
    fn probe(&self, target: &Path) -> Result<Option<ModuleId>, ResolveError> {
        if target.is_file() {
            return self.finish(target);
        }

        for ext in &self.options.extensions {
            let mut with_ext = OsString::from(target.as_os_str());
            with_ext.push(ext);
            let with_ext = PathBuf::from(with_ext);
            if with_ext.is_file() {
                return self.finish(&with_ext);
            }
        }

        if target.is_dir() {
            for ext in &self.options.extensions {
                let index_path = target.join(format!("index{ext}"));
                if index_path.is_file() {
                    return self.finish(&index_path);
                }
            }
        }

        Ok(None)
    }

    fn finish(&self, path: &Path) -> Result<Option<ModuleId>, ResolveError> {
        let resolved = if self.options.preserve_symlinks {
            std::path::absolute(path)
        } else {
            fs::canonicalize(path)
        };
        let resolved = resolved.map_err(|source| ResolveError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        ModuleId::from_path(&resolved).map(Some)
    }
}

impl Resolver for NodeResolver {
    fn resolve(&self, specifier: &str, context: &Path) -> Result<Option<ModuleId>, ResolveError> {
        let Some(base_dir) = context.parent() else {
            return Ok(None);
        };

        let resolved = if specifier.starts_with("./")
            || specifier.starts_with("../")
            || specifier == "."
            || specifier == ".."
        {
            self.probe(&base_dir.join(specifier))?
        } else if Path::new(specifier).is_absolute() {
            self.probe(Path::new(specifier))?
        } else {
            self.resolve_bare(specifier, base_dir)?
        };

        tracing::trace!(
            specifier,
            context = %context.display(),
            resolved = resolved.as_ref().map(ModuleId::as_str),
            "resolve"
        );
        Ok(resolved)
    }
}
