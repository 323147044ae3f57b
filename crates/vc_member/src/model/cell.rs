//! Static storage for [`MemberModel`]s.
//!
//! A model is built once per type and lives for the rest of the process,
//! which lets compiled accessors hold `&'static` references to it.
//!
//! - [`ModelCell`]: for non-generic types, a thin wrapper over [`OnceLock`].
//! - [`GenericModelCell`]: for generic types. The `static CELL` inside a generic
//!   function is shared by every instantiation, so the models are kept in a
//!   map keyed by [`TypeId`].

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_utils::hash::HashMap;

use super::MemberModel;

// -----------------------------------------------------------------------------
// ModelCell

/// Container for the [`MemberModel`] of a non-generic type.
///
/// # Examples
///
/// ```
/// use vc_member::model::{Accessible, MemberModel, Members, ModelCell};
///
/// struct Empty;
///
/// impl Accessible for Empty {
///     fn static_members(&self) -> Option<&'static MemberModel> {
///         Some(Self::member_model())
///     }
/// }
///
/// impl Members for Empty {
///     fn member_model() -> &'static MemberModel {
///         static CELL: ModelCell = ModelCell::new();
///         CELL.get_or_init(|| MemberModel::new::<Empty>([]))
///     }
/// }
///
/// assert!(core::ptr::eq(Empty::member_model(), Empty::member_model()));
/// ```
pub struct ModelCell(OnceLock<MemberModel>);

impl ModelCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored model, building it with `f` on first use.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> MemberModel) -> &MemberModel {
        self.0.get_or_init(f)
    }
}

impl Default for ModelCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericModelCell

/// Container for the [`MemberModel`]s of a generic type.
///
/// # Examples
///
/// ```
/// use core::any::Any;
/// use vc_member::model::{Accessible, GenericModelCell, MemberModel, Members};
///
/// struct Wrapper<T>(T);
///
/// impl<T: 'static> Accessible for Wrapper<T> {
///     fn static_members(&self) -> Option<&'static MemberModel> {
///         Some(Self::member_model())
///     }
/// }
///
/// impl<T: 'static> Members for Wrapper<T> {
///     fn member_model() -> &'static MemberModel {
///         static CELL: GenericModelCell = GenericModelCell::new();
///         CELL.get_or_insert::<Self>(|| MemberModel::new::<Self>([]))
///     }
/// }
///
/// let a = <Wrapper<u8>>::member_model();
/// let b = <Wrapper<u16>>::member_model();
/// assert_ne!(a.owner(), b.owner());
/// assert!(core::ptr::eq(a, <Wrapper<u8>>::member_model()));
/// ```
pub struct GenericModelCell(RwLock<HashMap<TypeId, &'static MemberModel>>);

impl GenericModelCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(HashMap::with_hasher(vc_utils::hash::FixedHashState)))
    }

    /// Returns the model stored for `G`, building it with `f` on first use.
    ///
    /// If two threads race, both may run `f` but only the first model is kept.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(
        &self,
        f: impl FnOnce() -> MemberModel,
    ) -> &'static MemberModel {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> MemberModel,
    ) -> &'static MemberModel {
        match self.get_by_type_id(type_id) {
            Some(model) => model,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static MemberModel> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, model: MemberModel) -> &'static MemberModel {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(model)))
    }
}

impl Default for GenericModelCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
