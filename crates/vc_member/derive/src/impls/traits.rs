use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, parse_quote};

use crate::derive_data::MemberStruct;
use crate::path::{macro_utils_, model_};

use super::descriptors::member_descriptors;

/// Generics with the bounds every generated impl needs.
///
/// For generic types: type parameters are `'static`, member types are
/// `Clone + Send + Sync + 'static`, and `Self: Default` with `#[member(default)]`.
fn bounded_generics(data: &MemberStruct) -> Generics {
    let mut generics = data.generics.clone();
    if !data.is_generic() {
        return generics;
    }

    let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    let member_tys: Vec<_> = data
        .properties()
        .iter()
        .map(|p| p.value_ty().0)
        .chain(data.fields.iter().map(|f| f.value_ty))
        .cloned()
        .collect();
    let default = data.attrs.default.is_some();

    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause.predicates.push(parse_quote! { #param: 'static });
    }
    for ty in member_tys {
        where_clause.predicates.push(parse_quote! {
            #ty: ::core::clone::Clone + ::core::marker::Send + ::core::marker::Sync + 'static
        });
    }
    if default {
        where_clause
            .predicates
            .push(parse_quote! { Self: ::core::default::Default });
    }
    generics
}

pub(crate) fn impl_members_trait(data: &MemberStruct) -> TokenStream {
    let utils_ = macro_utils_(&data.vc_member_path);
    let model_ = model_(&data.vc_member_path);
    let ident = data.ident;
    let generics = bounded_generics(data);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let descriptors = member_descriptors(data);
    let public = data.public;
    let constructor = match data.attrs.default {
        Some(_) => quote! { .with_default_constructor::<Self>() },
        None => crate::utils::empty(),
    };

    let build = quote! {
        #model_::MemberModel::new::<Self>(
            #utils_::Box::<[#model_::MemberDescriptor]>::from([ #(#descriptors),* ])
        )
        .with_public(#public)
        #constructor
    };

    let body = if data.is_generic() {
        quote! {
            static CELL: #model_::GenericModelCell = #model_::GenericModelCell::new();
            CELL.get_or_insert::<Self>(|| #build)
        }
    } else {
        quote! {
            static CELL: #model_::ModelCell = #model_::ModelCell::new();
            CELL.get_or_init(|| #build)
        }
    };

    quote! {
        impl #impl_generics #model_::Members for #ident #ty_generics #where_clause {
            fn member_model() -> &'static #model_::MemberModel {
                #body
            }
        }
    }
}

pub(crate) fn impl_accessible_trait(data: &MemberStruct) -> TokenStream {
    let utils_ = macro_utils_(&data.vc_member_path);
    let model_ = model_(&data.vc_member_path);
    let ident = data.ident;
    let generics = bounded_generics(data);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics #model_::Accessible for #ident #ty_generics #where_clause {
            #[inline]
            fn static_members(&self) -> #utils_::Option<&'static #model_::MemberModel> {
                #utils_::Option::Some(<Self as #model_::Members>::member_model())
            }
        }
    }
}
