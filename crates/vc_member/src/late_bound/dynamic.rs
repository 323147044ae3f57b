use alloc::vec::Vec;

use crate::AccessError;
use crate::Value;

use super::MemberBinding;

/// An object that resolves its own members at run time.
///
/// Implementors must also implement [`Accessible`](crate::model::Accessible)
/// and return `Some(self)` from `as_dynamic` and `as_dynamic_mut`.
pub trait DynamicObject {
    /// Names of the members currently present.
    fn dynamic_member_names(&self) -> Vec<&str>;

    /// Whether a member named `name` is present.
    ///
    /// The default implementation searches [`dynamic_member_names`](Self::dynamic_member_names).
    fn has_dynamic_member(&self, name: &str) -> bool {
        self.dynamic_member_names().contains(&name)
    }

    /// Reads a member. A missing member is an [`AccessError::LateBinding`].
    fn dynamic_get(&self, binding: &MemberBinding) -> Result<Value, AccessError>;

    /// Writes a member, adding it if the object allows that.
    fn dynamic_set(&mut self, binding: &MemberBinding, value: Value) -> Result<(), AccessError>;
}
