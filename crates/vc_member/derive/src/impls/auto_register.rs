use crate::derive_data::MemberStruct;

/// Generate `auto_register` submission.
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(data: &MemberStruct) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    if let Some(span) = data.attrs.auto_register {
        // Invalid for generic types.
        if data.is_generic() {
            return crate::utils::empty();
        }

        let auto_register_ = crate::path::auto_register_(&data.vc_member_path);
        let model_ = crate::path::model_(&data.vc_member_path);
        let ident = data.ident;

        quote_spanned! { span =>
            #auto_register_::inventory::submit!{
                #auto_register_::AutoRegisterMembers(
                    <#ident as #model_::Members>::member_model
                )
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate `auto_register` submission.
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &MemberStruct) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
