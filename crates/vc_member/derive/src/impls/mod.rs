//! Code generation for `#[derive(Members)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod descriptors;
mod traits;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::MemberStruct;

/// Generates every impl for `data`, wrapped in an anonymous const.
pub(crate) fn impl_members(data: &MemberStruct) -> TokenStream {
    let members_impl = traits::impl_members_trait(data);
    let accessible_impl = traits::impl_accessible_trait(data);
    let auto_register = auto_register::get_auto_register_impl(data);

    quote! {
        const _: () = {
            #members_impl

            #accessible_impl

            #auto_register
        };
    }
}
