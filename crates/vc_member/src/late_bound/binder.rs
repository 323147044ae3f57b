use alloc::sync::Arc;
use std::sync::{PoisonError, RwLock};

use vc_utils::hash::HashMap;

use super::MemberBinding;

// -----------------------------------------------------------------------------
// BindingTable

#[derive(Default)]
struct BindingTable(RwLock<HashMap<Arc<str>, Arc<MemberBinding>>>);

impl BindingTable {
    fn get_or_bind(&self, name: &str, kind: &'static str) -> Arc<MemberBinding> {
        if let Some(binding) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return binding.clone();
        }

        let binding = Arc::new(MemberBinding::new(Arc::from(name)));

        let mut table = self.0.write().unwrap_or_else(PoisonError::into_inner);
        let stored = table
            .entry(binding.interned_name().clone())
            .or_insert_with(|| binding.clone());

        if Arc::ptr_eq(stored, &binding) {
            log::trace!("Bound {kind} operation for member `{name}`");
        } else {
            log::trace!("Lost {kind} binding race for member `{name}`, reusing the stored one");
        }
        stored.clone()
    }

    fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

// -----------------------------------------------------------------------------
// MemberBinder

/// Process-wide tables of late-bound get and set operations, keyed by member name.
///
/// The first binding stored for a name wins; later callers always receive the
/// same [`Arc`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_member::late_bound::MemberBinder;
///
/// let binder = MemberBinder::new();
///
/// let a = binder.bind_get("title");
/// let b = binder.bind_get("title");
/// let c = binder.bind_set("title");
///
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(!Arc::ptr_eq(&a, &c));
/// ```
#[derive(Default)]
pub struct MemberBinder {
    getters: BindingTable,
    setters: BindingTable,
}

impl MemberBinder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared get operation for `name`, creating it on first use.
    #[inline]
    pub fn bind_get(&self, name: &str) -> Arc<MemberBinding> {
        self.getters.get_or_bind(name, "get")
    }

    /// Returns the shared set operation for `name`, creating it on first use.
    #[inline]
    pub fn bind_set(&self, name: &str) -> Arc<MemberBinding> {
        self.setters.get_or_bind(name, "set")
    }

    /// Number of distinct get operations created so far.
    #[inline]
    pub fn get_bindings(&self) -> usize {
        self.getters.len()
    }

    /// Number of distinct set operations created so far.
    #[inline]
    pub fn set_bindings(&self) -> usize {
        self.setters.len()
    }
}

impl core::fmt::Debug for MemberBinder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MemberBinder")
            .field("get_bindings", &self.get_bindings())
            .field("set_bindings", &self.set_bindings())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::MemberBinder;

    #[test]
    fn one_binding_per_name_and_direction() {
        let binder = MemberBinder::new();

        let get_a = binder.bind_get("a");
        let get_b = binder.bind_get("b");
        let set_a = binder.bind_set("a");

        assert!(Arc::ptr_eq(&get_a, &binder.bind_get("a")));
        assert!(!Arc::ptr_eq(&get_a, &get_b));
        assert!(!Arc::ptr_eq(&get_a, &set_a));
        assert_eq!(binder.get_bindings(), 2);
        assert_eq!(binder.set_bindings(), 1);
    }

    #[test]
    fn concurrent_binding_converges() {
        let binder = MemberBinder::new();

        let bindings: Vec<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8).map(|_| s.spawn(|| binder.bind_get("shared"))).collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(bindings.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert_eq!(binder.get_bindings(), 1);
    }
}
