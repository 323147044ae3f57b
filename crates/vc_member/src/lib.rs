#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_member` paths; this makes them resolve inside
// the crate itself as well as in doc tests.
extern crate self as vc_member;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod error;
mod object;
mod options;
mod value;

pub mod cache;
pub mod compile;
pub mod late_bound;
pub mod model;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use accessor::TypeAccessor;
pub use error::AccessError;
pub use object::ObjectAccessor;
pub use options::AccessOptions;
pub use value::Value;
pub use vc_member_derive as derive;
