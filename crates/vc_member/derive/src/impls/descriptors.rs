use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use crate::derive_data::{FieldMember, MemberStruct, PropertyDecl};
use crate::path::{access_error_, macro_utils_, model_, value_};

struct Paths {
    utils_: TokenStream,
    model_: TokenStream,
    value_: TokenStream,
    error_: TokenStream,
}

impl Paths {
    fn new(vc_member_path: &syn::Path) -> Self {
        Self {
            utils_: macro_utils_(vc_member_path),
            model_: model_(vc_member_path),
            value_: value_(vc_member_path),
            error_: access_error_(vc_member_path),
        }
    }
}

/// `MemberDescriptor` expressions, properties first then fields.
pub(crate) fn member_descriptors(data: &MemberStruct) -> Vec<TokenStream> {
    let paths = Paths::new(&data.vc_member_path);

    let properties = data.properties().iter().map(|p| property_descriptor(&paths, p));
    let fields = data.fields.iter().map(|f| field_descriptor(&paths, f));

    properties.chain(fields).collect()
}

fn property_descriptor(paths: &Paths, prop: &PropertyDecl) -> TokenStream {
    let Paths {
        utils_,
        model_,
        value_,
        error_,
    } = paths;
    let name = &prop.name;
    let (ty, nullable) = prop.value_ty();
    let Conversions {
        wrap,
        unwrap,
        nullable,
    } = Conversions::new(utils_, ty, nullable);

    let getter = match &prop.get {
        Some(method) => quote! {
            #utils_::Option::Some(
                (|obj: &dyn #utils_::Any| -> #utils_::Result<#value_, #error_> {
                    let this = #utils_::downcast_ref::<Self>(obj)?;
                    #utils_::Result::Ok(#wrap(this.#method()))
                }) as #model_::GetterFn
            )
        },
        None => quote! { #utils_::Option::None },
    };

    let setter = match &prop.set {
        Some(method) => quote! {
            #utils_::Option::Some(
                (|obj: &mut dyn #utils_::Any, value: #value_| -> #utils_::Result<(), #error_> {
                    let this = #utils_::downcast_mut::<Self>(obj)?;
                    this.#method(#unwrap(value)?);
                    #utils_::Result::Ok(())
                }) as #model_::SetterFn
            )
        },
        None => quote! { #utils_::Option::None },
    };

    quote! {
        #model_::MemberDescriptor::property::<#ty>(#name, #getter, #setter)
        #nullable
    }
}

/// Value conversions for one member, nullable members go through `Option<T>`.
struct Conversions {
    wrap: TokenStream,
    unwrap: TokenStream,
    nullable: TokenStream,
}

impl Conversions {
    fn new(utils_: &TokenStream, ty: &syn::Type, nullable: bool) -> Self {
        if nullable {
            Self {
                wrap: quote! { #utils_::wrap_nullable::<#ty> },
                unwrap: quote! { #utils_::unwrap_nullable::<#ty> },
                nullable: quote! { .with_nullable() },
            }
        } else {
            Self {
                wrap: quote! { #utils_::wrap::<#ty> },
                unwrap: quote! { #utils_::unwrap::<#ty> },
                nullable: crate::utils::empty(),
            }
        }
    }
}

fn field_descriptor(paths: &Paths, field: &FieldMember) -> TokenStream {
    let Paths {
        utils_,
        model_,
        value_,
        error_,
    } = paths;
    let name = LitStr::new(&field.name, field.ident.span());
    let ident = field.ident;
    let ty = field.value_ty;

    let Conversions {
        wrap,
        unwrap,
        nullable,
    } = Conversions::new(utils_, ty, field.nullable);

    quote! {
        #model_::MemberDescriptor::field::<#ty>(
            #name,
            (|obj: &dyn #utils_::Any| -> #utils_::Result<#value_, #error_> {
                let this = #utils_::downcast_ref::<Self>(obj)?;
                #utils_::Result::Ok(#wrap(#utils_::Clone::clone(&this.#ident)))
            }) as #model_::GetterFn,
            (|obj: &mut dyn #utils_::Any, value: #value_| -> #utils_::Result<(), #error_> {
                let this = #utils_::downcast_mut::<Self>(obj)?;
                this.#ident = #unwrap(value)?;
                #utils_::Result::Ok(())
            }) as #model_::SetterFn,
        )
        #nullable
    }
}
