use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

// -----------------------------------------------------------------------------
// Named

/// An entry that can be found by name in a [`NameDispatch`].
pub trait Named {
    fn name(&self) -> &str;
}

// -----------------------------------------------------------------------------
// NameDispatch

enum Branch<E> {
    /// The only entry whose name starts with this character: one full comparison.
    Exact(E),
    /// Two or more entries sharing a first character.
    Bucket {
        first: Option<char>,
        entries: Box<[E]>,
    },
}

/// Name lookup table built once from an ordered list of entries.
///
/// Entries are grouped by the first character of their name, in order of first
/// appearance. A group with a single entry becomes an exact-match branch;
/// a larger group becomes a bucket that is only scanned when the requested
/// name starts with the same character. Lookup is exact and case-sensitive.
///
/// # Examples
///
/// ```
/// use vc_member::compile::{NameDispatch, Named};
///
/// struct Entry(&'static str);
///
/// impl Named for Entry {
///     fn name(&self) -> &str { self.0 }
/// }
///
/// let table = NameDispatch::build(["A", "AA", "B", "C"].map(Entry));
///
/// assert_eq!(table.len(), 4);
/// assert_eq!(table.branch_count(), 3);
/// assert_eq!(table.find("AA").map(|e| e.0), Some("AA"));
/// assert!(table.find("aa").is_none());
/// assert!(table.find("").is_none());
/// ```
pub struct NameDispatch<E> {
    branches: Box<[Branch<E>]>,
    len: usize,
}

impl<E: Named> NameDispatch<E> {
    pub fn build(entries: impl IntoIterator<Item = E>) -> Self {
        let mut groups: Vec<(Option<char>, Vec<E>)> = Vec::new();
        let mut len = 0usize;

        for entry in entries {
            len += 1;
            let first = entry.name().chars().next();
            match groups.iter_mut().find(|(c, _)| *c == first) {
                Some((_, group)) => group.push(entry),
                None => groups.push((first, vec![entry])),
            }
        }

        let branches = groups
            .into_iter()
            .map(|(first, mut group)| {
                if group.len() == 1
                    && let Some(entry) = group.pop()
                {
                    Branch::Exact(entry)
                } else {
                    Branch::Bucket {
                        first,
                        entries: group.into_boxed_slice(),
                    }
                }
            })
            .collect();

        Self { branches, len }
    }

    /// Finds the entry named exactly `name`.
    pub fn find(&self, name: &str) -> Option<&E> {
        let first = name.chars().next();
        for branch in &self.branches {
            match branch {
                Branch::Exact(entry) => {
                    if entry.name() == name {
                        return Some(entry);
                    }
                }
                Branch::Bucket { first: c, entries } => {
                    // Every entry with this first character lives in this bucket.
                    if *c == first {
                        return entries.iter().find(|e| e.name() == name);
                    }
                }
            }
        }
        None
    }
}

impl<E> NameDispatch<E> {
    /// Number of entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of top-level branches, one per distinct first character.
    #[inline]
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Iterates over all entries in build order within each branch.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.branches.iter().flat_map(|branch| match branch {
            Branch::Exact(entry) => core::slice::from_ref(entry),
            Branch::Bucket { entries, .. } => &entries[..],
        })
    }
}

impl<E: Named> fmt::Debug for NameDispatch<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(Named::name)).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{NameDispatch, Named};

    struct Entry(&'static str, usize);

    impl Named for Entry {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn table(names: &[&'static str]) -> NameDispatch<Entry> {
        NameDispatch::build(names.iter().enumerate().map(|(i, n)| Entry(n, i)))
    }

    #[test]
    fn groups_by_first_char() {
        let t = table(&["A", "AA", "B", "C"]);
        assert_eq!(t.branch_count(), 3);
        assert_eq!(t.find("A").map(|e| e.1), Some(0));
        assert_eq!(t.find("AA").map(|e| e.1), Some(1));
        assert_eq!(t.find("B").map(|e| e.1), Some(2));
        assert_eq!(t.find("C").map(|e| e.1), Some(3));
        assert!(t.find("D").is_none());
        assert!(t.find("AAA").is_none());
    }

    #[test]
    fn preserves_first_appearance_order() {
        let t = table(&["beta", "alpha", "bravo", "apple"]);
        let names: Vec<_> = t.iter().map(|e| e.0).collect();
        assert_eq!(names, ["beta", "bravo", "alpha", "apple"]);
    }

    #[test]
    fn case_sensitive() {
        let t = table(&["Name", "name"]);
        assert_eq!(t.branch_count(), 2);
        assert_eq!(t.find("name").map(|e| e.1), Some(1));
        assert!(t.find("NAME").is_none());
    }

    #[test]
    fn empty_name_never_matches_a_bucket() {
        let t = table(&["x", "xy"]);
        assert!(t.find("").is_none());

        let t = table(&["", "x"]);
        assert_eq!(t.find("").map(|e| e.1), Some(0));
    }

    #[test]
    fn non_ascii_first_char() {
        let t = table(&["été", "étoile", "eau"]);
        assert_eq!(t.branch_count(), 2);
        assert_eq!(t.find("étoile").map(|e| e.1), Some(1));
        assert_eq!(t.find("eau").map(|e| e.1), Some(2));
    }

    #[test]
    fn empty_table() {
        let t = table(&[]);
        assert!(t.is_empty());
        assert!(t.find("a").is_none());
    }
}
