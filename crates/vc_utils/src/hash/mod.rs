//! Provide hash containers, re-exports *hashbrown* and *foldhash*.
//!
//! [`HashMap`] and [`HashSet`] are the `hashbrown` containers with
//! [`FixedHashState`] as the default hashing provider, so they can be
//! created with `Default` (or `with_hasher(FixedHashState)` in const context).

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashMap;
///
/// let mut map: HashMap<&str, i32> = HashMap::default();
/// map.insert("a", 1);
///
/// assert_eq!(map.get("a"), Some(&1));
/// ```
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashSet;
///
/// let names: HashSet<&str> = ["a", "b"].into_iter().collect();
///
/// assert!(names.contains("a"));
/// assert!(!names.contains("c"));
/// ```
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

/// Entry API of [`HashMap`].
pub mod hash_map {
    pub use hashbrown::hash_map::{Entry, EntryRef, OccupiedEntry, VacantEntry};
}

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
