use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Ident, LitStr, Type};

use crate::MEMBER_ATTRIBUTE_NAME;
use crate::utils::option_inner;

// -----------------------------------------------------------------------------
// PropertyDecl

/// `#[member(property(name = "...", ty = T, get = m, set = m))]`
pub(crate) struct PropertyDecl {
    pub name: LitStr,
    pub ty: Type,
    pub get: Option<Ident>,
    pub set: Option<Ident>,
}

impl PropertyDecl {
    /// The member value type, `T` for `Option<T>`, and whether it is nullable.
    pub(crate) fn value_ty(&self) -> (&Type, bool) {
        match option_inner(&self.ty) {
            Some(inner) => (inner, true),
            None => (&self.ty, false),
        }
    }

    fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut name: Option<LitStr> = None;
        let mut ty: Option<Type> = None;
        let mut get: Option<Ident> = None;
        let mut set: Option<Ident> = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                name = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("ty") {
                ty = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("get") {
                get = Some(inner.value()?.parse()?);
            } else if inner.path.is_ident("set") {
                set = Some(inner.value()?.parse()?);
            } else {
                return Err(inner.error("expected `name`, `ty`, `get` or `set`"));
            }
            Ok(())
        })?;

        let Some(name) = name else {
            return Err(meta.error("property requires `name = \"...\"`"));
        };
        let Some(ty) = ty else {
            return Err(meta.error("property requires `ty = Type`"));
        };
        if get.is_none() && set.is_none() {
            return Err(meta.error("property requires `get`, `set`, or both"));
        }

        Ok(Self { name, ty, get, set })
    }
}

// -----------------------------------------------------------------------------
// TypeAttributes

/// Type-level `#[member(...)]` attributes.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `#[member(default)]`: `Default::default` is the parameterless constructor.
    pub default: Option<Span>,
    /// `#[member(auto_register)]`
    pub auto_register: Option<Span>,
    pub properties: Vec<PropertyDecl>,
}

impl TypeAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MEMBER_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    out.default = Some(meta.path.span());
                } else if meta.path.is_ident("auto_register") {
                    out.auto_register = Some(meta.path.span());
                } else if meta.path.is_ident("property") {
                    out.properties.push(PropertyDecl::parse(&meta)?);
                } else if meta.path.is_ident("skip") || meta.path.is_ident("rename") {
                    return Err(meta.error("this attribute can only be applied to fields"));
                } else {
                    return Err(meta.error("expected `default`, `auto_register` or `property(...)`"));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field-level `#[member(...)]` attributes.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub(crate) fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MEMBER_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                } else if meta.path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error("expected `skip` or `rename = \"...\"`"));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}
