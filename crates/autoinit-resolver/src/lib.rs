//! Module resolution for the auto-init aggregator.
//!
//! The dependency walk only talks to the [`Resolver`] trait. Hosts with their
//! own resolution pipeline implement it themselves; [`NodeResolver`] is a
//! filesystem implementation of Node-style package resolution for everyone
//! else.

pub mod error;
pub mod exports;
pub mod module_id;
pub mod node;
pub mod resolver;
pub mod specifier;

pub use error::ResolveError;
pub use module_id::ModuleId;
pub use node::{NodeResolver, ResolverOptions};
pub use resolver::{from_fn, FnResolver, Resolver};
