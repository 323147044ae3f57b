use core::any::Any;

use crate::late_bound::DynamicObject;

use super::MemberModel;

// -----------------------------------------------------------------------------
// Accessible

/// A value whose members can be read and written by name.
///
/// An object is either statically described, exposing a [`MemberModel`]
/// through [`static_members`](Accessible::static_members), or dynamic,
/// exposing a [`DynamicObject`] through [`as_dynamic`](Accessible::as_dynamic).
///
/// Usually implemented by [`#[derive(Members)]`](crate::derive::Members).
/// [`Expando`](crate::late_bound::Expando) and `BTreeMap<String, Value>`
/// are the built-in dynamic objects.
pub trait Accessible: Any {
    #[inline]
    fn static_members(&self) -> Option<&'static MemberModel> {
        None
    }

    #[inline]
    fn as_dynamic(&self) -> Option<&dyn DynamicObject> {
        None
    }

    #[inline]
    fn as_dynamic_mut(&mut self) -> Option<&mut dyn DynamicObject> {
        None
    }
}

impl dyn Accessible {
    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        let any: &dyn Any = self;
        any.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }
}

// -----------------------------------------------------------------------------
// Members

/// Static access to a type's [`MemberModel`].
///
/// Derive it with [`#[derive(Members)]`](crate::derive::Members), which also
/// implements [`Accessible`]. Manual implementations should store the model in a
/// [`ModelCell`](super::ModelCell) or [`GenericModelCell`](super::GenericModelCell).
pub trait Members: Accessible + Sized {
    fn member_model() -> &'static MemberModel;
}
