use std::collections::HashSet;

use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericParam, Generics, Ident, Type, Visibility};

use super::{FieldAttributes, PropertyDecl, TypeAttributes};
use crate::utils::option_inner;

// -----------------------------------------------------------------------------
// FieldMember

/// A `pub` field exposed as a member.
pub(crate) struct FieldMember<'a> {
    pub ident: &'a Ident,
    pub name: String,
    /// The declared value type: `T` for `Option<T>` fields.
    pub value_ty: &'a Type,
    pub nullable: bool,
}

// -----------------------------------------------------------------------------
// MemberStruct

/// Everything needed to generate the impls for one struct.
pub(crate) struct MemberStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub public: bool,
    pub attrs: TypeAttributes,
    pub fields: Vec<FieldMember<'a>>,
    pub vc_member_path: syn::Path,
}

impl<'a> MemberStruct<'a> {
    pub(crate) fn parse(ast: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Some(&fields.named),
                Fields::Unit => None,
                Fields::Unnamed(fields) => {
                    return Err(syn::Error::new(
                        fields.span(),
                        "`Members` can only be derived for structs with named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`Members` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`Members` cannot be derived for unions",
                ));
            }
        };

        if let Some(param) = ast
            .generics
            .params
            .iter()
            .find(|p| matches!(p, GenericParam::Lifetime(_)))
        {
            return Err(syn::Error::new(
                param.span(),
                "`Members` cannot be derived for types with lifetime parameters",
            ));
        }

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut fields = Vec::new();
        for field in named.into_iter().flatten() {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if field_attrs.skip || !matches!(field.vis, Visibility::Public(_)) {
                continue;
            }
            // Named fields always have an ident.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let name = match &field_attrs.rename {
                Some(lit) => lit.value(),
                None => ident.unraw().to_string(),
            };
            let (value_ty, nullable) = match option_inner(&field.ty) {
                Some(inner) => (inner, true),
                None => (&field.ty, false),
            };
            fields.push(FieldMember {
                ident,
                name,
                value_ty,
                nullable,
            });
        }

        let data = Self {
            ident: &ast.ident,
            generics: &ast.generics,
            public: matches!(ast.vis, Visibility::Public(_)),
            attrs,
            fields,
            vc_member_path: crate::path::vc_member(),
        };
        data.check_unique_names()?;
        Ok(data)
    }

    /// Readable names and writable names must each be unique.
    fn check_unique_names(&self) -> syn::Result<()> {
        let mut readable: HashSet<String> = HashSet::new();
        let mut writable: HashSet<String> = HashSet::new();

        for prop in &self.attrs.properties {
            let name = prop.name.value();
            if (prop.get.is_some() && !readable.insert(name.clone()))
                || (prop.set.is_some() && !writable.insert(name.clone()))
            {
                return Err(syn::Error::new(
                    prop.name.span(),
                    format!("duplicate member name `{name}`"),
                ));
            }
        }
        for field in &self.fields {
            if !readable.insert(field.name.clone()) || !writable.insert(field.name.clone()) {
                return Err(syn::Error::new(
                    field.ident.span(),
                    format!("duplicate member name `{}`", field.name),
                ));
            }
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn properties(&self) -> &[PropertyDecl] {
        &self.attrs.properties
    }

    #[inline]
    pub(crate) fn is_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }
}
