use alloc::format;
use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use vc_utils::hash::HashMap;

use crate::accessor::TypeAccessor;
use crate::compile::{CompiledAccessor, compile};
use crate::late_bound::{DynamicObject, LateBoundAccessor, MemberBinder};
use crate::model::{Accessible, MemberModel, Members};
use crate::{AccessError, AccessOptions};

use super::{MemberRegistry, Registration};

// -----------------------------------------------------------------------------
// AccessorKey

/// Cache key: a type and the options its accessor was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccessorKey {
    pub type_id: TypeId,
    pub options: AccessOptions,
}

// -----------------------------------------------------------------------------
// AccessorCache

/// Thread-safe cache of accessors, keyed by `(type, options)`.
///
/// An accessor is compiled the first time its key is requested and shared from
/// then on. Concurrent first requests may each compile one, but only the first
/// stored is kept and every caller receives that same instance.
/// Entries are never evicted.
///
/// All dynamic types share one [`LateBoundAccessor`] per options value.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_member::cache::AccessorCache;
/// use vc_member::derive::Members;
/// use vc_member::{AccessOptions, TypeAccessor, Value};
///
/// #[derive(Members)]
/// pub struct Counter { pub hits: u64 }
///
/// let cache = AccessorCache::new();
/// cache.register::<Counter>();
///
/// let a = cache.static_accessor::<Counter>(AccessOptions::empty()).unwrap();
/// let b = cache.static_accessor::<Counter>(AccessOptions::empty()).unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// let mut c = Counter { hits: 0 };
/// a.set_value(&mut c, "hits", Value::new(3_u64)).unwrap();
/// assert_eq!(c.hits, 3);
/// ```
pub struct AccessorCache {
    registry: RwLock<MemberRegistry>,
    compiled: RwLock<HashMap<AccessorKey, Arc<CompiledAccessor>>>,
    late_bound: RwLock<HashMap<AccessOptions, Arc<LateBoundAccessor>>>,
    binder: Arc<MemberBinder>,
}

impl Default for AccessorCache {
    /// See [`AccessorCache::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL: LazyLock<AccessorCache> = LazyLock::new(|| {
    let mut registry = MemberRegistry::new();
    registry.auto_register();
    log::debug!("Global accessor cache initialized with {} types", registry.len());
    AccessorCache::with_registry(registry)
});

impl AccessorCache {
    /// Creates a cache over [`MemberRegistry::new`].
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(MemberRegistry::new())
    }

    pub fn with_registry(registry: MemberRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
            compiled: RwLock::default(),
            late_bound: RwLock::default(),
            binder: Arc::new(MemberBinder::new()),
        }
    }

    /// The process-wide cache.
    ///
    /// Its registry starts with the built-in dynamic objects and every type
    /// collected by [`MemberRegistry::auto_register`]. Other types are
    /// registered on first use by [`static_accessor`](Self::static_accessor)
    /// and [`ObjectAccessor`](crate::ObjectAccessor).
    #[inline]
    pub fn global() -> &'static AccessorCache {
        &GLOBAL
    }

    #[inline]
    pub fn registry(&self) -> RwLockReadGuard<'_, MemberRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    pub fn registry_mut(&self) -> RwLockWriteGuard<'_, MemberRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`MemberRegistry::register`].
    #[inline]
    pub fn register<T: Members>(&self) -> bool {
        self.registry_mut().register::<T>()
    }

    /// See [`MemberRegistry::register_dynamic`].
    #[inline]
    pub fn register_dynamic<T: DynamicObject + Accessible>(&self) -> bool {
        self.registry_mut().register_dynamic::<T>()
    }

    /// The binder shared by this cache's late-bound accessors.
    #[inline]
    pub fn binder(&self) -> &Arc<MemberBinder> {
        &self.binder
    }

    /// Returns the accessor for a registered type, building it on first request.
    ///
    /// # Errors
    ///
    /// [`AccessError::InvalidArgument`] if the type is not registered or not public.
    pub fn get_or_build(
        &self,
        type_id: TypeId,
        options: AccessOptions,
    ) -> Result<Arc<dyn TypeAccessor>, AccessError> {
        let registration = self.registry().get(type_id);
        match registration {
            Some(Registration::Static(model)) => Ok(self.accessor_for_model(model, options)?),
            Some(Registration::Dynamic { .. }) => Ok(self.late_bound(options)),
            None => Err(AccessError::invalid_argument(
                "type",
                "type is not registered for member access",
            )),
        }
    }

    /// Like [`get_or_build`](Self::get_or_build), looking the type up by name.
    pub fn by_type_name(
        &self,
        type_name: &str,
        options: AccessOptions,
    ) -> Result<Arc<dyn TypeAccessor>, AccessError> {
        let type_id = self.registry().type_id_of(type_name).ok_or_else(|| {
            AccessError::invalid_argument(
                "type",
                format!("no registered type named `{type_name}`"),
            )
        })?;
        self.get_or_build(type_id, options)
    }

    /// Returns the compiled accessor for `T`, registering `T` if needed.
    #[inline]
    pub fn static_accessor<T: Members>(
        &self,
        options: AccessOptions,
    ) -> Result<Arc<CompiledAccessor>, AccessError> {
        self.accessor_for_model(T::member_model(), options)
    }

    /// Returns the compiled accessor for the type described by `model`,
    /// registering it if needed.
    ///
    /// # Errors
    ///
    /// [`AccessError::InvalidArgument`] if the type is not public.
    pub fn accessor_for_model(
        &self,
        model: &'static MemberModel,
        options: AccessOptions,
    ) -> Result<Arc<CompiledAccessor>, AccessError> {
        let key = AccessorKey {
            type_id: model.owner(),
            options,
        };

        if let Some(accessor) = self.compiled_read().get(&key) {
            return Ok(accessor.clone());
        }

        if !model.is_public() {
            return Err(AccessError::invalid_argument(
                "type",
                format!(
                    "`{}` is not public; accessors are only built for public types",
                    model.type_name()
                ),
            ));
        }

        if !self.registry().contains(key.type_id) {
            self.registry_mut().register_model(model);
        }

        // Built outside the lock; a racing builder may win the insert below.
        let built = Arc::new(compile(model, options));

        let mut compiled = self.compiled.write().unwrap_or_else(PoisonError::into_inner);
        let stored = compiled.entry(key).or_insert_with(|| built.clone());
        if Arc::ptr_eq(stored, &built) {
            log::debug!(
                "Compiled accessor for `{}` ({} readable, {} writable, {options:?})",
                model.type_name(),
                model.readable().len(),
                model.writable().len(),
            );
        } else {
            log::trace!(
                "Discarded duplicate accessor for `{}`, another thread stored one first",
                model.type_name()
            );
        }
        Ok(stored.clone())
    }

    /// The late-bound accessor for `options`.
    pub fn late_bound(&self, options: AccessOptions) -> Arc<LateBoundAccessor> {
        if let Some(accessor) = self
            .late_bound
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&options)
        {
            return accessor.clone();
        }

        self.late_bound
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(options)
            .or_insert_with(|| Arc::new(LateBoundAccessor::new(self.binder.clone(), options)))
            .clone()
    }

    /// Number of compiled accessors currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.compiled_read().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.compiled_read().is_empty()
    }

    #[inline]
    fn compiled_read(&self) -> RwLockReadGuard<'_, HashMap<AccessorKey, Arc<CompiledAccessor>>> {
        self.compiled.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for AccessorCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessorCache")
            .field("registry", &*self.registry())
            .field("compiled", &self.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec::Vec;
    use core::any::TypeId;

    use super::AccessorCache;
    use crate::derive::Members;
    use crate::late_bound::Expando;
    use crate::model::Members as _;
    use crate::{AccessError, AccessOptions, TypeAccessor, Value};

    #[derive(Members, Default)]
    #[member(default)]
    pub struct Sample {
        pub id: u32,
        pub label: String,
    }

    #[derive(Members)]
    struct Hidden {
        pub id: u32,
    }

    #[test]
    fn same_key_same_accessor() {
        let cache = AccessorCache::new();
        let a = cache.static_accessor::<Sample>(AccessOptions::empty()).unwrap();
        let b = cache.static_accessor::<Sample>(AccessOptions::empty()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn options_are_part_of_the_key() {
        let cache = AccessorCache::new();
        let checked = cache.static_accessor::<Sample>(AccessOptions::empty()).unwrap();
        let unchecked = cache
            .static_accessor::<Sample>(AccessOptions::DISABLE_ARGUMENT_VALIDATION)
            .unwrap();
        assert!(!Arc::ptr_eq(&checked, &unchecked));
        assert!(checked.validation_enabled());
        assert!(!unchecked.validation_enabled());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn concurrent_requests_share_one_accessor() {
        let cache = AccessorCache::new();
        cache.register::<Sample>();

        let accessors: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        cache
                            .static_accessor::<Sample>(AccessOptions::empty())
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(accessors.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn get_or_build_by_type_id() {
        let cache = AccessorCache::new();
        assert!(matches!(
            cache.get_or_build(TypeId::of::<Sample>(), AccessOptions::empty()),
            Err(AccessError::InvalidArgument { param: "type", .. })
        ));

        cache.register::<Sample>();
        let accessor = cache
            .get_or_build(TypeId::of::<Sample>(), AccessOptions::empty())
            .unwrap();
        let mut s = Sample::default();
        accessor.set_value(&mut s, "id", Value::new(9_u32)).unwrap();
        assert_eq!(s.id, 9);

        let names = accessor.readable_member_names().unwrap();
        assert!(names.contains("id") && names.contains("label"));
    }

    #[test]
    fn dynamic_types_use_the_late_bound_accessor() {
        let cache = AccessorCache::new();
        let accessor = cache
            .get_or_build(TypeId::of::<Expando>(), AccessOptions::empty())
            .unwrap();

        let mut obj = Expando::new();
        accessor.set_value(&mut obj, "x", Value::new(1_i8)).unwrap();
        assert_eq!(obj.get("x").and_then(|v| v.downcast_ref::<i8>()), Some(&1));

        let again = cache.late_bound(AccessOptions::empty());
        assert!(Arc::ptr_eq(&again, &cache.late_bound(AccessOptions::empty())));
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn non_public_types_are_rejected() {
        let cache = AccessorCache::new();
        assert!(!Hidden::member_model().is_public());
        assert!(matches!(
            cache.static_accessor::<Hidden>(AccessOptions::empty()),
            Err(AccessError::InvalidArgument { .. })
        ));
        let _ = Hidden { id: 0 }.id;
    }

    #[test]
    fn lookup_by_name() {
        let cache = AccessorCache::new();
        cache.register::<Sample>();
        assert!(cache.by_type_name("Sample", AccessOptions::empty()).is_ok());
        assert!(cache.by_type_name("Missing", AccessOptions::empty()).is_err());
    }
}
