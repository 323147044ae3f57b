//! Parsing of the derive input into [`MemberStruct`].

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod member_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use attributes::{FieldAttributes, PropertyDecl, TypeAttributes};
pub(crate) use member_struct::{FieldMember, MemberStruct};
