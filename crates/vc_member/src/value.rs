use alloc::sync::Arc;
use core::any::{Any, TypeId};
use core::fmt;

// -----------------------------------------------------------------------------
// Value

/// A type-erased, cloneable and possibly-null member value.
///
/// This is what accessors read out of and write into members.
/// Cloning is cheap: the payload is shared behind an [`Arc`].
///
/// # Examples
///
/// ```
/// use vc_member::Value;
///
/// let v = Value::new(123_i32);
/// assert!(v.is::<i32>());
/// assert_eq!(v.downcast_ref::<i32>(), Some(&123));
/// assert_eq!(v.take::<i32>().unwrap(), 123);
///
/// let null = Value::null();
/// assert!(null.is_null());
/// assert_eq!(null.type_name(), "null");
/// ```
#[derive(Clone)]
pub struct Value {
    payload: Option<Arc<dyn Any + Send + Sync>>,
    type_name: &'static str,
}

impl Value {
    /// Wraps a value.
    #[inline]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            payload: Some(Arc::new(value)),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// The null value.
    #[inline]
    pub const fn null() -> Self {
        Self {
            payload: None,
            type_name: "null",
        }
    }

    /// Wraps `Some(value)`, or returns [`Value::null`] for `None`.
    #[inline]
    pub fn from_option<T: Any + Send + Sync>(value: Option<T>) -> Self {
        value.map_or(Self::null(), Self::new)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        self.payload.is_none()
    }

    /// Returns `true` if the value is non-null and holds a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.value_type_id() == Some(TypeId::of::<T>())
    }

    /// The [`TypeId`] of the held value, `None` for null.
    #[inline]
    pub fn value_type_id(&self) -> Option<TypeId> {
        self.payload.as_deref().map(|payload| {
            let payload: &dyn Any = payload;
            payload.type_id()
        })
    }

    /// The type name of the held value, `"null"` for null.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref()?.downcast_ref()
    }

    /// Extracts the held `T`.
    ///
    /// The payload is moved out when this is the last handle to it,
    /// otherwise it is cloned. Returns `self` unchanged on a type mismatch
    /// or when the value is null.
    pub fn take<T: Any + Send + Sync + Clone>(self) -> Result<T, Self> {
        let Some(payload) = self.payload else {
            return Err(self);
        };
        match payload.downcast::<T>() {
            Ok(value) => Ok(Arc::unwrap_or_clone(value)),
            Err(payload) => Err(Self {
                payload: Some(payload),
                type_name: self.type_name,
            }),
        }
    }
}

impl Default for Value {
    /// See [`Value::null`].
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.payload {
            Some(_) => write!(f, "Value({})", self.type_name),
            None => f.write_str("Value(null)"),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::Value;

    #[test]
    fn take_moves_or_clones() {
        let a = Value::new(String::from("abc"));
        let b = a.clone();
        assert_eq!(a.take::<String>().unwrap(), "abc");
        assert_eq!(b.take::<String>().unwrap(), "abc");
    }

    #[test]
    fn take_wrong_type_keeps_value() {
        let v = Value::new(7_u8);
        let back = v.take::<i32>().unwrap_err();
        assert!(back.is::<u8>());
        assert_eq!(back.type_name(), "u8");
    }

    #[test]
    fn null_and_option() {
        assert!(Value::from_option::<i32>(None).is_null());
        assert!(Value::from_option(Some(1_i32)).is::<i32>());
        assert!(Value::null().take::<i32>().is_err());
        assert_eq!(Value::null().value_type_id(), None);
        assert_eq!(format!("{:?}", Value::null()), "Value(null)");
    }
}
