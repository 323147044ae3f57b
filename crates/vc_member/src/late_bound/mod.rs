//! Member access for objects whose members are only known at run time.
//!
//! A [`DynamicObject`] resolves members itself. The [`MemberBinder`] hands out one
//! shared [`MemberBinding`] per member name and direction, so repeated accesses to
//! the same name reuse the same interned name and slot hint.
//! [`LateBoundAccessor`] is the [`TypeAccessor`](crate::TypeAccessor) used for every
//! dynamic type.
//!
//! Built-in dynamic objects: [`Expando`] and `BTreeMap<String, Value>`.

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod binder;
mod binding;
mod dynamic;
mod expando;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::LateBoundAccessor;
pub use binder::MemberBinder;
pub use binding::MemberBinding;
pub use dynamic::DynamicObject;
pub use expando::Expando;
