use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::{AccessError, Value};

use super::DynamicObject;

const NO_SLOT: usize = usize::MAX;

/// A reusable get or set operation for one member name.
///
/// Handed out by [`MemberBinder`](super::MemberBinder); equal names share one binding.
/// The binding carries an advisory slot hint that dynamic objects may use as an
/// inline cache. The hint is never trusted without checking the slot's name.
pub struct MemberBinding {
    name: Arc<str>,
    slot_hint: AtomicUsize,
}

impl MemberBinding {
    pub(crate) fn new(name: Arc<str>) -> Self {
        Self {
            name,
            slot_hint: AtomicUsize::new(NO_SLOT),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The interned name, shared with every object that stored it through this binding.
    #[inline]
    pub fn interned_name(&self) -> &Arc<str> {
        &self.name
    }

    /// The last slot at which this member was found, if any.
    #[inline]
    pub fn slot_hint(&self) -> Option<usize> {
        match self.slot_hint.load(Ordering::Relaxed) {
            NO_SLOT => None,
            slot => Some(slot),
        }
    }

    #[inline]
    pub fn update_slot_hint(&self, slot: usize) {
        self.slot_hint.store(slot, Ordering::Relaxed);
    }

    /// Reads the member from `obj`.
    #[inline]
    pub fn get(&self, obj: &dyn DynamicObject) -> Result<Value, AccessError> {
        obj.dynamic_get(self)
    }

    /// Writes the member of `obj`.
    #[inline]
    pub fn set(&self, obj: &mut dyn DynamicObject, value: Value) -> Result<(), AccessError> {
        obj.dynamic_set(self, value)
    }
}

impl fmt::Debug for MemberBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberBinding")
            .field("name", &&*self.name)
            .field("slot_hint", &self.slot_hint())
            .finish()
    }
}
