//! Paths into `vc_member` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `vc_member` crate.
///
/// 1. For crates that depend on `vc_member`, `::vc_member` is returned.
/// 2. For crates that depend on `vc_access`, `::vc_access::member` is returned.
/// 3. Otherwise `::vc_member` is returned, which may be incorrect.
///
/// This reads the builder's `Cargo.toml`, so it is resolved once per derive
/// and passed around.
pub(crate) fn vc_member() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_member"))
}

#[inline(always)]
pub(crate) fn macro_utils_(vc_member_path: &syn::Path) -> TokenStream {
    quote! { #vc_member_path::__macro_exports::macro_utils }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_member_path: &syn::Path) -> TokenStream {
    quote! { #vc_member_path::__macro_exports::auto_register }
}

#[inline(always)]
pub(crate) fn model_(vc_member_path: &syn::Path) -> TokenStream {
    quote! { #vc_member_path::model }
}

#[inline(always)]
pub(crate) fn value_(vc_member_path: &syn::Path) -> TokenStream {
    quote! { #vc_member_path::Value }
}

#[inline(always)]
pub(crate) fn access_error_(vc_member_path: &syn::Path) -> TokenStream {
    quote! { #vc_member_path::AccessError }
}
