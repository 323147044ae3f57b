use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use vc_utils::hash::HashMap;

use crate::model::Accessible;
use crate::{AccessError, Value};

use super::{DynamicObject, MemberBinding};

// -----------------------------------------------------------------------------
// Expando

/// An object whose members are added by assigning to them.
///
/// Members keep insertion order. Lookups through a [`MemberBinding`] first try the
/// binding's slot hint and fall back to the name index.
///
/// # Examples
///
/// ```
/// use vc_member::late_bound::Expando;
/// use vc_member::Value;
///
/// let mut obj = Expando::new();
/// obj.insert("title", Value::new(String::from("draft")));
/// obj.insert("pages", Value::new(12_u32));
///
/// assert_eq!(obj.len(), 2);
/// assert_eq!(obj.get("pages").and_then(|v| v.downcast_ref::<u32>()), Some(&12));
/// assert!(obj.get("Pages").is_none());
///
/// let names: Vec<_> = obj.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, ["title", "pages"]);
/// ```
#[derive(Default, Clone)]
pub struct Expando {
    slots: Vec<(Arc<str>, Value)>,
    index: HashMap<Arc<str>, usize>,
}

impl Expando {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let slot = *self.index.get(name)?;
        Some(&self.slots[slot].1)
    }

    /// Sets a member, returning the previous value if it existed.
    pub fn insert(&mut self, name: impl Into<Arc<str>>, value: Value) -> Option<Value> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&slot) => Some(core::mem::replace(&mut self.slots[slot].1, value)),
            None => {
                self.push(name, value);
                None
            }
        }
    }

    /// Removes a member. The last member takes its slot.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let slot = self.index.remove(name)?;
        let (_, value) = self.slots.swap_remove(slot);
        if let Some((moved, _)) = self.slots.get(slot)
            && let Some(idx) = self.index.get_mut(moved)
        {
            *idx = slot;
        }
        Some(value)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.slots.iter().map(|(name, value)| (&**name, value))
    }

    fn push(&mut self, name: Arc<str>, value: Value) -> usize {
        let slot = self.slots.len();
        self.index.insert(name.clone(), slot);
        self.slots.push((name, value));
        slot
    }

    fn slot_of(&self, binding: &MemberBinding) -> Option<usize> {
        if let Some(hint) = binding.slot_hint()
            && let Some((name, _)) = self.slots.get(hint)
            && (Arc::ptr_eq(name, binding.interned_name()) || **name == *binding.name())
        {
            return Some(hint);
        }
        let slot = *self.index.get(binding.name())?;
        binding.update_slot_hint(slot);
        Some(slot)
    }
}

impl DynamicObject for Expando {
    fn dynamic_member_names(&self) -> Vec<&str> {
        self.slots.iter().map(|(name, _)| &**name).collect()
    }

    #[inline]
    fn has_dynamic_member(&self, name: &str) -> bool {
        self.contains(name)
    }

    fn dynamic_get(&self, binding: &MemberBinding) -> Result<Value, AccessError> {
        match self.slot_of(binding) {
            Some(slot) => Ok(self.slots[slot].1.clone()),
            None => Err(AccessError::LateBinding {
                member: binding.name().into(),
            }),
        }
    }

    fn dynamic_set(&mut self, binding: &MemberBinding, value: Value) -> Result<(), AccessError> {
        match self.slot_of(binding) {
            Some(slot) => self.slots[slot].1 = value,
            None => {
                let slot = self.push(binding.interned_name().clone(), value);
                binding.update_slot_hint(slot);
            }
        }
        Ok(())
    }
}

impl Accessible for Expando {
    #[inline]
    fn as_dynamic(&self) -> Option<&dyn DynamicObject> {
        Some(self)
    }

    #[inline]
    fn as_dynamic_mut(&mut self) -> Option<&mut dyn DynamicObject> {
        Some(self)
    }
}

impl fmt::Debug for Expando {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// BTreeMap

impl DynamicObject for BTreeMap<String, Value> {
    fn dynamic_member_names(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    #[inline]
    fn has_dynamic_member(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn dynamic_get(&self, binding: &MemberBinding) -> Result<Value, AccessError> {
        self.get(binding.name())
            .cloned()
            .ok_or_else(|| AccessError::LateBinding {
                member: binding.name().into(),
            })
    }

    fn dynamic_set(&mut self, binding: &MemberBinding, value: Value) -> Result<(), AccessError> {
        self.insert(binding.name().into(), value);
        Ok(())
    }
}

impl Accessible for BTreeMap<String, Value> {
    #[inline]
    fn as_dynamic(&self) -> Option<&dyn DynamicObject> {
        Some(self)
    }

    #[inline]
    fn as_dynamic_mut(&mut self) -> Option<&mut dyn DynamicObject> {
        Some(self)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::Expando;
    use crate::Value;
    use crate::late_bound::{DynamicObject, MemberBinder};

    #[test]
    fn set_then_get_through_bindings() {
        let binder = MemberBinder::new();
        let mut obj = Expando::new();

        binder.bind_set("n").set(&mut obj, Value::new(3_i64)).unwrap();
        let v = binder.bind_get("n").get(&obj).unwrap();

        assert_eq!(v.downcast_ref::<i64>(), Some(&3));
        assert_eq!(obj.dynamic_member_names(), ["n"]);
    }

    #[test]
    fn missing_member_is_late_binding_error() {
        let binder = MemberBinder::new();
        let obj = Expando::new();

        let err = binder.bind_get("missing").get(&obj).unwrap_err();
        assert!(matches!(err, crate::AccessError::LateBinding { .. }));
    }

    #[test]
    fn stale_slot_hint_is_ignored() {
        let binder = MemberBinder::new();
        let get_b = binder.bind_get("b");

        let mut first = Expando::new();
        first.insert("a", Value::new(1_u8));
        first.insert("b", Value::new(2_u8));
        assert_eq!(get_b.get(&first).unwrap().downcast_ref::<u8>(), Some(&2));
        assert_eq!(get_b.slot_hint(), Some(1));

        let mut second = Expando::new();
        second.insert("b", Value::new(7_u8));
        second.insert("c", Value::new(9_u8));
        assert_eq!(get_b.get(&second).unwrap().downcast_ref::<u8>(), Some(&7));
        assert_eq!(get_b.slot_hint(), Some(0));
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut obj = Expando::new();
        obj.insert("a", Value::new(1_u8));
        obj.insert("b", Value::new(2_u8));
        obj.insert("c", Value::new(3_u8));

        assert!(obj.remove("a").is_some());
        assert!(obj.remove("a").is_none());
        assert_eq!(obj.get("c").and_then(|v| v.downcast_ref::<u8>()), Some(&3));
        assert_eq!(obj.get("b").and_then(|v| v.downcast_ref::<u8>()), Some(&2));
        assert_eq!(obj.len(), 2);
    }

    #[test]
    fn insert_replaces() {
        let mut obj = Expando::new();
        assert!(obj.insert("a", Value::new(1_u8)).is_none());
        let old = obj.insert("a", Value::new(2_u8)).unwrap();
        assert_eq!(old.downcast_ref::<u8>(), Some(&1));
        assert_eq!(obj.len(), 1);
    }
}
