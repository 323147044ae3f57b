use alloc::boxed::Box;

use vc_utils::hash::HashSet;

use crate::model::Accessible;
use crate::{AccessError, Value};

// -----------------------------------------------------------------------------
// TypeAccessor

/// Reads and writes members of instances by name.
///
/// Implemented by [`CompiledAccessor`](crate::compile::CompiledAccessor) for types
/// with a [`MemberModel`](crate::model::MemberModel) and by
/// [`LateBoundAccessor`](crate::late_bound::LateBoundAccessor) for dynamic objects.
/// Obtain one from an [`AccessorCache`](crate::cache::AccessorCache).
///
/// Accessors are immutable once built and can be shared freely between threads.
pub trait TypeAccessor: Send + Sync + 'static {
    /// Reads a member, failing with [`AccessError::MemberNotFound`] if there is
    /// no readable member of that name.
    fn get_value(&self, obj: &dyn Accessible, name: &str) -> Result<Value, AccessError>;

    /// Reads a member, returning `Ok(None)` if there is no readable member of that name.
    fn try_get_value(&self, obj: &dyn Accessible, name: &str)
    -> Result<Option<Value>, AccessError>;

    /// Writes a member, failing with [`AccessError::MemberNotFound`] if there is
    /// no writable member of that name.
    fn set_value(&self, obj: &mut dyn Accessible, name: &str, value: Value)
    -> Result<(), AccessError>;

    /// Writes a member, returning `Ok(false)` if there is no writable member of that name.
    fn try_set_value(
        &self,
        obj: &mut dyn Accessible,
        name: &str,
        value: Value,
    ) -> Result<bool, AccessError>;

    /// Builds a new instance with the type's parameterless constructor.
    ///
    /// Each call returns a distinct instance.
    fn create_instance(&self) -> Result<Box<dyn Accessible>, AccessError>;

    fn readable_member_names(&self) -> Result<&HashSet<&'static str>, AccessError>;

    fn writable_member_names(&self) -> Result<&HashSet<&'static str>, AccessError>;

    /// Whether instance and value arguments are checked before use.
    fn validation_enabled(&self) -> bool;
}
