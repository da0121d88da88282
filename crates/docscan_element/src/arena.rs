//! Arena allocator for elements.
//!
//! Uses `bumpalo` for bump allocation. Everything decoded during one read
//! (elements, text, byte payloads, big-integer magnitudes) is allocated in the
//! same arena and freed together when the read completes.

use bumpalo::Bump;
use num_bigint::{BigInt, Sign};

use crate::Int;

/// Arena allocator for elements and their payloads.
///
/// # Example
///
/// ```rust
/// use docscan_element::ElementArena;
///
/// let arena = ElementArena::new();
///
/// let s = arena.alloc_str("hello");
/// assert_eq!(s, "hello");
///
/// let bytes = arena.alloc_bytes(&[1, 2, 3]);
/// assert_eq!(bytes, &[1, 2, 3]);
/// ```
pub struct ElementArena {
    bump: Bump,
}

impl ElementArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a new arena with the specified initial capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Allocates a value in the arena and returns a reference to it.
    ///
    /// Values allocated here are never dropped, so only `Copy`-like payloads
    /// (elements, tokens) should go through this method.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocates a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocates a copy of a byte payload in the arena.
    #[inline]
    pub fn alloc_bytes(&self, bytes: &[u8]) -> &[u8] {
        self.bump.alloc_slice_copy(bytes)
    }

    /// Allocates a slice in the arena by copying from the input slice.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Stores an arbitrary-precision integer.
    ///
    /// Values that fit in an `i64` are kept inline; larger values store their
    /// big-endian magnitude in the arena.
    pub fn alloc_big_int(&self, value: &BigInt) -> Int<'_> {
        if let Ok(small) = i64::try_from(value) {
            return Int::I64(small);
        }
        let (sign, magnitude) = value.to_bytes_be();
        Int::Big {
            negative: sign == Sign::Minus,
            magnitude: self.bump.alloc_slice_copy(&magnitude),
        }
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Resets the arena, deallocating all allocated objects.
    #[inline]
    pub fn reset(&mut self) {
        self.bump.reset();
    }
}

impl Default for ElementArena {
    fn default() -> Self {
        Self::new()
    }
}
