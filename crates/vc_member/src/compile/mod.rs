//! Turns a [`MemberModel`](crate::model::MemberModel) into a [`CompiledAccessor`].
//!
//! Compilation happens once per `(type, options)` pair; the
//! [`AccessorCache`](crate::cache::AccessorCache) is responsible for that.
//! Each compiled accessor holds two [`NameDispatch`] tables, one for getters and one
//! for setters, which group members by the first character of their name.

// -----------------------------------------------------------------------------
// Modules

mod compiled;
mod dispatch;

// -----------------------------------------------------------------------------
// Exports

pub use compiled::{CompiledAccessor, compile};
pub use dispatch::{NameDispatch, Named};
