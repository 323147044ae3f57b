use proc_macro2::TokenStream;
use syn::{GenericArgument, PathArguments, Type};

#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// Returns `T` if `ty` is written as `Option<T>`.
///
/// Matches `Option`, `option::Option` and `core::`/`std::option::Option`;
/// aliases of `Option` are not recognized.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segments = &type_path.path.segments;
    let last = segments.last()?;
    if last.ident != "Option" {
        return None;
    }

    let prefix_ok = match segments.len() {
        1 => true,
        2 => segments[0].ident == "option",
        3 => {
            (segments[0].ident == "core" || segments[0].ident == "std")
                && segments[1].ident == "option"
        }
        _ => false,
    };
    if !prefix_ok {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
