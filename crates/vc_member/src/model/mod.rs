//! Per-type member metadata.
//!
//! ## Menu
//!
//! - [`MemberDescriptor`]: one readable and/or writable member (field or property).
//! - [`MemberModel`]: every member of one type, split into readable and writable sequences.
//! - [`Accessible`]: object-safe trait for values an accessor can operate on.
//! - [`Members`]: static access to a type's [`MemberModel`], usually derived.
//! - [`ModelCell`] / [`GenericModelCell`]: static storage used to build a model once per type.
//!
//! A member is readable iff it has a getter and writable iff it has a setter.
//! [`#[derive(Members)]`](crate::derive::Members) treats every `pub` named field as
//! readable and writable, and every declared property according to its `get`/`set`.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod descriptor;
mod member_model;
mod traits;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericModelCell, ModelCell};
pub use descriptor::{GetterFn, MemberDescriptor, MemberKind, SetterFn};
pub use member_model::{Constructor, MemberModel};
pub use traits::{Accessible, Members};
