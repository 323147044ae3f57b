//! See [`Members`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MEMBER_ATTRIBUTE_NAME: &str = "member";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Derive Member Access
///
/// `#[derive(Members)]` implements `Members` and `Accessible` for a struct with
/// named fields, describing which members can be read and written by name.
///
/// Only `pub` fields become members; they are readable and writable.
/// A field of type `Option<T>` is nullable: it reads `None` as null and accepts null.
/// Raw identifiers lose their prefix, so `pub r#type: u8` is the member `type`.
///
/// Whether the struct itself is `pub` is recorded in the model;
/// accessors are only built for public types.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Members)]
/// pub struct Foo {
///     #[member(rename = "Id")]
///     pub id: u64,
///     #[member(skip)]
///     pub cache: Vec<u8>,
/// }
/// ```
///
/// - `rename = "..."`: expose the field under another name.
/// - `skip`: do not expose a `pub` field.
///
/// ## Properties
///
/// Method-backed members are declared at the type level. `get` names a
/// `fn(&self) -> T`, `set` names a `fn(&mut self, T)`; either may be omitted.
///
/// ```rust, ignore
/// #[derive(Members)]
/// #[member(property(name = "Total", ty = u64, get = total))]
/// #[member(property(name = "Label", ty = String, get = label, set = set_label))]
/// pub struct Foo { /* ... */ }
/// ```
///
/// A property with `ty = Option<T>` is nullable like an `Option<T>` field.
/// Properties come before fields in the model.
///
/// ## Type Attributes
///
/// - `default`: use `Default::default` as the parameterless constructor.
/// - `auto_register`: collect the type for `MemberRegistry::auto_register`.
///   No effect on generic types, or when the `auto_register` feature is disabled.
///
/// ```rust, ignore
/// #[derive(Members, Default)]
/// #[member(default, auto_register)]
/// pub struct Foo { /* ... */ }
/// ```
///
/// ## Restrictions
///
/// - Only structs with named fields (or unit structs) are supported.
/// - Lifetime parameters are not supported; type parameters must be `'static`.
/// - Member types must be `Clone + Send + Sync + 'static`.
/// - Member names must be unique among readable and among writable members.
#[proc_macro_derive(Members, attributes(member))]
pub fn derive_members(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::MemberStruct::parse(&ast) {
        Ok(data) => impls::impl_members(&data).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
