use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use vc_utils::hash::HashSet;

use crate::accessor::TypeAccessor;
use crate::model::Accessible;
use crate::{AccessError, AccessOptions, Value};

use super::{DynamicObject, MemberBinder};

const NOT_DYNAMIC: &str = "expected a late-bound object";

/// The [`TypeAccessor`] for [`DynamicObject`]s.
///
/// One instance serves every dynamic type for a given set of options;
/// member names are resolved per call through the shared [`MemberBinder`].
///
/// With validation enabled, reads check that the member exists first
/// ([`AccessError::MemberNotFound`], or `Ok(None)` from `try_get_value`).
/// Writes never check existence: dynamic objects may add members on assignment.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_member::late_bound::{Expando, LateBoundAccessor, MemberBinder};
/// use vc_member::{AccessError, AccessOptions, TypeAccessor, Value};
///
/// let accessor = LateBoundAccessor::new(Arc::new(MemberBinder::new()), AccessOptions::empty());
/// let mut obj = Expando::new();
///
/// assert!(accessor.try_set_value(&mut obj, "count", Value::new(1_u32)).unwrap());
/// let count = accessor.get_value(&obj, "count").unwrap();
/// assert_eq!(count.downcast_ref::<u32>(), Some(&1));
///
/// assert!(matches!(
///     accessor.get_value(&obj, "missing"),
///     Err(AccessError::MemberNotFound { .. })
/// ));
/// assert!(accessor.create_instance().is_err());
/// ```
pub struct LateBoundAccessor {
    binder: Arc<MemberBinder>,
    validation: bool,
}

impl LateBoundAccessor {
    pub fn new(binder: Arc<MemberBinder>, options: AccessOptions) -> Self {
        Self {
            binder,
            validation: options.validation_enabled(),
        }
    }

    #[inline]
    pub fn binder(&self) -> &Arc<MemberBinder> {
        &self.binder
    }

    fn not_dynamic(&self) -> AccessError {
        if self.validation {
            AccessError::invalid_argument("obj", NOT_DYNAMIC)
        } else {
            AccessError::InvalidCast {
                expected: "dyn DynamicObject",
                found: "statically described object",
            }
        }
    }

    fn dynamic<'a>(&self, obj: &'a dyn Accessible) -> Result<&'a dyn DynamicObject, AccessError> {
        obj.as_dynamic().ok_or_else(|| self.not_dynamic())
    }

    fn dynamic_mut<'a>(
        &self,
        obj: &'a mut dyn Accessible,
    ) -> Result<&'a mut dyn DynamicObject, AccessError> {
        match obj.as_dynamic_mut() {
            Some(dynamic) => Ok(dynamic),
            None => Err(self.not_dynamic()),
        }
    }
}

impl TypeAccessor for LateBoundAccessor {
    fn get_value(&self, obj: &dyn Accessible, name: &str) -> Result<Value, AccessError> {
        let dynamic = self.dynamic(obj)?;
        if self.validation && !dynamic.has_dynamic_member(name) {
            return Err(AccessError::member_not_found(name));
        }
        self.binder.bind_get(name).get(dynamic)
    }

    fn try_get_value(
        &self,
        obj: &dyn Accessible,
        name: &str,
    ) -> Result<Option<Value>, AccessError> {
        let dynamic = self.dynamic(obj)?;
        if self.validation && !dynamic.has_dynamic_member(name) {
            return Ok(None);
        }
        self.binder.bind_get(name).get(dynamic).map(Some)
    }

    fn set_value(
        &self,
        obj: &mut dyn Accessible,
        name: &str,
        value: Value,
    ) -> Result<(), AccessError> {
        let dynamic = self.dynamic_mut(obj)?;
        self.binder.bind_set(name).set(dynamic, value)
    }

    fn try_set_value(
        &self,
        obj: &mut dyn Accessible,
        name: &str,
        value: Value,
    ) -> Result<bool, AccessError> {
        self.set_value(obj, name, value)?;
        Ok(true)
    }

    fn create_instance(&self) -> Result<Box<dyn Accessible>, AccessError> {
        Err(AccessError::UnsupportedOperation(
            "late-bound types cannot be constructed",
        ))
    }

    fn readable_member_names(&self) -> Result<&HashSet<&'static str>, AccessError> {
        Err(AccessError::UnsupportedOperation(
            "late-bound types do not declare members",
        ))
    }

    fn writable_member_names(&self) -> Result<&HashSet<&'static str>, AccessError> {
        Err(AccessError::UnsupportedOperation(
            "late-bound types do not declare members",
        ))
    }

    #[inline]
    fn validation_enabled(&self) -> bool {
        self.validation
    }
}

impl fmt::Debug for LateBoundAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LateBoundAccessor")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::sync::Arc;

    use super::LateBoundAccessor;
    use crate::late_bound::{Expando, MemberBinder};
    use crate::{AccessError, AccessOptions, TypeAccessor, Value};

    fn accessor(options: AccessOptions) -> LateBoundAccessor {
        LateBoundAccessor::new(Arc::new(MemberBinder::new()), options)
    }

    #[test]
    fn try_get_missing_with_validation() {
        let acc = accessor(AccessOptions::empty());
        let obj = Expando::new();
        assert!(acc.try_get_value(&obj, "x").unwrap().is_none());
    }

    #[test]
    fn missing_without_validation_reaches_the_binding() {
        let acc = accessor(AccessOptions::DISABLE_ARGUMENT_VALIDATION);
        let obj = Expando::new();
        assert!(matches!(
            acc.get_value(&obj, "x"),
            Err(AccessError::LateBinding { .. })
        ));
        assert!(matches!(
            acc.try_get_value(&obj, "x"),
            Err(AccessError::LateBinding { .. })
        ));
    }

    #[test]
    fn works_on_maps() {
        let acc = accessor(AccessOptions::empty());
        let mut map: BTreeMap<String, Value> = BTreeMap::new();

        acc.set_value(&mut map, "k", Value::new(String::from("v")))
            .unwrap();
        let v = acc.get_value(&map, "k").unwrap();

        assert_eq!(v.downcast_ref::<String>().map(String::as_str), Some("v"));
        assert!(map.contains_key("k"));
    }

    #[test]
    fn rejects_static_objects() {
        struct NotDynamic;
        impl crate::model::Accessible for NotDynamic {}
        let mut obj = NotDynamic;

        let acc = accessor(AccessOptions::empty());
        assert!(matches!(
            acc.set_value(&mut obj, "x", Value::new(1_i32)),
            Err(AccessError::InvalidArgument { param: "obj", .. })
        ));

        let acc = accessor(AccessOptions::DISABLE_ARGUMENT_VALIDATION);
        assert!(matches!(
            acc.get_value(&obj, "x"),
            Err(AccessError::InvalidCast { .. })
        ));
    }

    #[test]
    fn member_names_unsupported() {
        let acc = accessor(AccessOptions::empty());
        assert!(matches!(
            acc.readable_member_names(),
            Err(AccessError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            acc.writable_member_names(),
            Err(AccessError::UnsupportedOperation(_))
        ));
    }
}
