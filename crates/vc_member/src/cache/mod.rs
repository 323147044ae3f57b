//! Registration of accessible types and caching of their accessors.
//!
//! - [`MemberRegistry`]: which types can be accessed, and how.
//! - [`AccessorCache`]: one accessor per `(type, options)` pair, built on first request.

// -----------------------------------------------------------------------------
// Modules

mod accessor_cache;
mod registry;

// -----------------------------------------------------------------------------
// Exports

pub use accessor_cache::{AccessorCache, AccessorKey};
pub use registry::{MemberRegistry, Registration};
