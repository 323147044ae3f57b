//! Provide `FixedHasher`.
//!
//! Based on the `foldhash` crate with a fixed seed: hash results depend
//! only on the input, never on the process.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x6D1F_3A0C_52B4_E897);

/// The hasher built by [`FixedHashState`].
///
/// A type alias for [`foldhash::fast::FoldHasher`].
pub type FixedHasher = FoldHasher<'static>;

/// Fixed hash state, `foldhash` with a compile-time seed.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("member");
/// let b = FixedHashState.hash_one("member");
///
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::FixedHashState;

    #[test]
    fn stable_across_builders() {
        let one = FixedHashState.hash_one(42_u64);
        let two = FixedHashState::default().hash_one(42_u64);
        assert_eq!(one, two);
        assert_ne!(one, FixedHashState.hash_one(43_u64));
    }
}
