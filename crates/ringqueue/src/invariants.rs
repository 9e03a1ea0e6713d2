//! Debug assertion macros for queue invariants.
//!
//! They are only active in debug builds (`#[cfg(debug_assertions)]`), so there is
//! zero overhead in release builds.

// =============================================================================
// Bounded Count
// =============================================================================

/// Assert that the live count does not exceed capacity.
///
/// **Invariant**: `0 ≤ len ≤ capacity`
///
/// Used in: `push()` after writing the new tail slot
macro_rules! debug_assert_bounded_count {
    ($len:expr, $capacity:expr) => {
        debug_assert!(
            $len <= $capacity,
            "bounded count violated: len {} exceeds capacity {}",
            $len,
            $capacity
        )
    };
}

// =============================================================================
// Cursor Consistency
// =============================================================================

/// Assert that tail sits exactly `len` slots after head.
///
/// **Invariant**: `tail == (head + len) mod capacity`
///
/// Used in: `push()`, `pop()`, after a grow
macro_rules! debug_assert_cursors {
    ($head:expr, $tail:expr, $len:expr, $capacity:expr) => {
        debug_assert!(
            $tail == ($head + $len) % $capacity,
            "cursor invariant violated: head {} + len {} != tail {} (mod {})",
            $head,
            $len,
            $tail,
            $capacity
        )
    };
}

// =============================================================================
// Strict Growth
// =============================================================================

/// Assert that a reallocation strictly increases capacity.
///
/// **Invariant**: capacity never shrinks; a grow always adds room
///
/// Used in: `grow()` before relocating
macro_rules! debug_assert_strict_growth {
    ($old:expr, $new:expr) => {
        debug_assert!(
            $new > $old,
            "growth violated: capacity went from {} to {}",
            $old,
            $new
        )
    };
}

// =============================================================================
// Initialized Range Check
// =============================================================================

/// Assert that we're reading a slot inside the live range.
///
/// **Invariant**: `slot(head + offset) is initialized ⟺ offset < len`
///
/// Used in: `grow()` before moving a slot into the new buffer
macro_rules! debug_assert_initialized_read {
    ($offset:expr, $len:expr) => {
        debug_assert!(
            $offset < $len,
            "initialized range violated: reading logical offset {} with only {} live elements",
            $offset,
            $len
        )
    };
}

pub(crate) use debug_assert_bounded_count;
pub(crate) use debug_assert_cursors;
pub(crate) use debug_assert_initialized_read;
pub(crate) use debug_assert_strict_growth;
