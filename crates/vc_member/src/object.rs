use alloc::sync::Arc;
use core::fmt;

use crate::accessor::TypeAccessor;
use crate::cache::AccessorCache;
use crate::model::Accessible;
use crate::{AccessError, AccessOptions, Value};

// -----------------------------------------------------------------------------
// ObjectAccessor

/// A [`TypeAccessor`] bound to one target object.
///
/// Picks the late-bound accessor for dynamic objects and the compiled accessor
/// of the object's [`MemberModel`](crate::model::MemberModel) otherwise.
///
/// # Examples
///
/// ```
/// use vc_member::derive::Members;
/// use vc_member::late_bound::Expando;
/// use vc_member::{AccessOptions, ObjectAccessor, Value};
///
/// #[derive(Members)]
/// pub struct User { pub name: String }
///
/// let mut user = User { name: "ann".into() };
/// let mut acc = ObjectAccessor::new(&mut user, AccessOptions::empty()).unwrap();
/// acc.set("name", Value::new(String::from("bob"))).unwrap();
/// assert_eq!(user.name, "bob");
///
/// let mut bag = Expando::new();
/// let mut acc = ObjectAccessor::new(&mut bag, AccessOptions::empty()).unwrap();
/// acc.set("anything", Value::new(1_u8)).unwrap();
/// assert!(acc.get("anything").unwrap().is::<u8>());
/// ```
pub struct ObjectAccessor<'a> {
    target: &'a mut dyn Accessible,
    accessor: Arc<dyn TypeAccessor>,
}

impl<'a> ObjectAccessor<'a> {
    /// Wraps `target` using the [global cache](AccessorCache::global).
    #[inline]
    pub fn new(target: &'a mut dyn Accessible, options: AccessOptions) -> Result<Self, AccessError> {
        Self::with_cache(AccessorCache::global(), target, options)
    }

    /// Wraps `target` using the given cache.
    ///
    /// # Errors
    ///
    /// [`AccessError::InvalidArgument`] if the object's type is not public, or the object
    /// exposes neither a member model nor dynamic members.
    pub fn with_cache(
        cache: &AccessorCache,
        target: &'a mut dyn Accessible,
        options: AccessOptions,
    ) -> Result<Self, AccessError> {
        let accessor: Arc<dyn TypeAccessor> = if target.as_dynamic().is_some() {
            cache.late_bound(options)
        } else if let Some(model) = target.static_members() {
            cache.accessor_for_model(model, options)?
        } else {
            return Err(AccessError::invalid_argument(
                "target",
                "object exposes neither a member model nor dynamic members",
            ));
        };

        Ok(Self { target, accessor })
    }

    #[inline]
    pub fn get(&self, name: &str) -> Result<Value, AccessError> {
        self.accessor.get_value(&*self.target, name)
    }

    #[inline]
    pub fn try_get(&self, name: &str) -> Result<Option<Value>, AccessError> {
        self.accessor.try_get_value(&*self.target, name)
    }

    #[inline]
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), AccessError> {
        self.accessor.set_value(&mut *self.target, name, value)
    }

    #[inline]
    pub fn try_set(&mut self, name: &str, value: Value) -> Result<bool, AccessError> {
        self.accessor.try_set_value(&mut *self.target, name, value)
    }

    /// The accessor in use.
    #[inline]
    pub fn accessor(&self) -> &Arc<dyn TypeAccessor> {
        &self.accessor
    }

    #[inline]
    pub fn target(&self) -> &dyn Accessible {
        &*self.target
    }

    #[inline]
    pub fn target_mut(&mut self) -> &mut dyn Accessible {
        &mut *self.target
    }
}

impl fmt::Debug for ObjectAccessor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectAccessor")
            .field("validation", &self.accessor.validation_enabled())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ObjectAccessor;
    use crate::cache::AccessorCache;
    use crate::derive::Members;
    use crate::model::Accessible;
    use crate::{AccessError, AccessOptions, Value};

    #[derive(Members)]
    pub struct Pair {
        pub left: i32,
        pub right: Option<i32>,
    }

    #[test]
    fn wraps_static_objects() {
        let cache = AccessorCache::new();
        let mut pair = Pair {
            left: 1,
            right: None,
        };

        let mut acc = ObjectAccessor::with_cache(&cache, &mut pair, AccessOptions::empty()).unwrap();
        assert!(acc.get("right").unwrap().is_null());
        acc.set("right", Value::new(4_i32)).unwrap();
        assert!(!acc.try_set("middle", Value::new(0_i32)).unwrap());
        assert!(acc.try_get("middle").unwrap().is_none());
        assert!(acc.target().is::<Pair>());

        assert_eq!(pair.right, Some(4));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn rejects_opaque_objects() {
        struct Opaque;
        impl Accessible for Opaque {}

        let cache = AccessorCache::new();
        let mut obj = Opaque;
        assert!(matches!(
            ObjectAccessor::with_cache(&cache, &mut obj, AccessOptions::empty()),
            Err(AccessError::InvalidArgument { param: "target", .. })
        ));
    }
}
