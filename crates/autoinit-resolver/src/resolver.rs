//! The resolver seam used by the dependency walk

use std::path::Path;
use std::sync::Arc;

use crate::error::ResolveError;
use crate::module_id::ModuleId;

/// Maps `(specifier, context file)` to a canonical module id.
///
/// Implementations must be deterministic: the same inputs must always yield
/// the same id, or deduplication across the walk breaks. `Ok(None)` means the
/// specifier could not be found from that context.
pub trait Resolver: Send + Sync {
    fn resolve(&self, specifier: &str, context: &Path) -> Result<Option<ModuleId>, ResolveError>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, specifier: &str, context: &Path) -> Result<Option<ModuleId>, ResolveError> {
        (**self).resolve(specifier, context)
    }
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn resolve(&self, specifier: &str, context: &Path) -> Result<Option<ModuleId>, ResolveError> {
        (**self).resolve(specifier, context)
    }
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn resolve(&self, specifier: &str, context: &Path) -> Result<Option<ModuleId>, ResolveError> {
        (**self).resolve(specifier, context)
    }
}

/// Adapter returned by [`from_fn`].
#[derive(Clone)]
pub struct FnResolver<F>(F);

/// Wrap a closure as a [`Resolver`].
pub fn from_fn<F>(f: F) -> FnResolver<F>
where
    F: Fn(&str, &Path) -> Result<Option<ModuleId>, ResolveError> + Send + Sync,
{
    FnResolver(f)
}

impl<F> Resolver for FnResolver<F>
where
    F: Fn(&str, &Path) -> Result<Option<ModuleId>, ResolveError> + Send + Sync,
{
    fn resolve(&self, specifier: &str, context: &Path) -> Result<Option<ModuleId>, ResolveError> {
        (self.0)(specifier, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_resolver() {
        let resolver = from_fn(|specifier, _context| {
            Ok((specifier == "shared/package.json").then(|| ModuleId::new("/pkgs/shared/package.json")))
        });

        let context = Path::new("/pkgs/app/package.json");
        assert_eq!(
            resolver.resolve("shared/package.json", context).unwrap(),
            Some(ModuleId::new("/pkgs/shared/package.json"))
        );
        assert_eq!(resolver.resolve("missing/package.json", context).unwrap(), None);
    }

    #[test]
    fn test_boxed_dyn_resolver() {
        let resolver: Box<dyn Resolver> = Box::new(from_fn(|_, _| Err(ResolveError::host("offline"))));
        let err = resolver.resolve("x", Path::new("/p/package.json")).unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }
}
