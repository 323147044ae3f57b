//! Items used by [`#[derive(Members)]`](crate::derive::Members). Not public API.

// -----------------------------------------------------------------------------
// Macro utils

pub mod macro_utils {
    pub use alloc::boxed::Box;
    pub use core::any::Any;
    pub use core::clone::Clone;
    pub use core::option::Option;
    pub use core::result::Result;

    use crate::{AccessError, Value};

    const OTHER: &str = "an instance of another type";

    #[inline]
    pub fn downcast_ref<T: Any>(obj: &dyn Any) -> Result<&T, AccessError> {
        obj.downcast_ref::<T>().ok_or(AccessError::InvalidCast {
            expected: core::any::type_name::<T>(),
            found: OTHER,
        })
    }

    #[inline]
    pub fn downcast_mut<T: Any>(obj: &mut dyn Any) -> Result<&mut T, AccessError> {
        obj.downcast_mut::<T>().ok_or(AccessError::InvalidCast {
            expected: core::any::type_name::<T>(),
            found: OTHER,
        })
    }

    #[inline]
    pub fn wrap<T: Any + Send + Sync>(value: T) -> Value {
        Value::new(value)
    }

    #[inline]
    pub fn wrap_nullable<T: Any + Send + Sync>(value: Option<T>) -> Value {
        Value::from_option(value)
    }

    /// Null is not assignable to a non-nullable member.
    #[inline]
    pub fn unwrap<T: Any + Send + Sync + Clone>(value: Value) -> Result<T, AccessError> {
        value.take::<T>().map_err(|value| AccessError::InvalidCast {
            expected: core::any::type_name::<T>(),
            found: value.type_name(),
        })
    }

    #[inline]
    pub fn unwrap_nullable<T: Any + Send + Sync + Clone>(
        value: Value,
    ) -> Result<Option<T>, AccessError> {
        if value.is_null() {
            Ok(None)
        } else {
            unwrap::<T>(value).map(Some)
        }
    }
}

// -----------------------------------------------------------------------------
// Auto register

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::model::MemberModel;

    /// One entry per type deriving `Members` with `#[member(auto_register)]`.
    pub struct AutoRegisterMembers(pub fn() -> &'static MemberModel);

    inventory::collect!(AutoRegisterMembers);
}
