//! Delimiter sets and their broadcast comparison vectors

use crate::error::{Result, SplitError};
use crate::VECTOR_WIDTH;

/// One delimiter byte broadcast into every lane of a window
///
/// Aligned so SIMD backends can use aligned loads.
#[repr(C, align(16))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DelimiterVector(pub [u8; VECTOR_WIDTH]);

impl DelimiterVector {
    /// Broadcast `byte` into all lanes
    #[inline]
    pub const fn splat(byte: u8) -> Self {
        Self([byte; VECTOR_WIDTH])
    }

    /// The delimiter this vector compares against
    #[inline(always)]
    pub fn byte(&self) -> u8 {
        self.0[0]
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const u8 {
        self.0.as_ptr()
    }
}

/// Ordered, immutable set of single-byte delimiters
///
/// Built once and reused for every window of every scan. Duplicate bytes
/// are kept; they only cost an extra comparison.
#[derive(Clone, Debug)]
pub struct DelimiterSet {
    bytes: Box<[u8]>,
    vectors: Box<[DelimiterVector]>,
}

impl DelimiterSet {
    /// Build the comparison vectors for `delimiters`, in declaration order
    pub fn new(delimiters: &[u8]) -> Result<Self> {
        if delimiters.is_empty() {
            return Err(SplitError::EmptyDelimiterSet);
        }

        let vectors = delimiters
            .iter()
            .map(|&byte| DelimiterVector::splat(byte))
            .collect();

        Ok(Self {
            bytes: delimiters.into(),
            vectors,
        })
    }

    /// Number of delimiters (one comparison per window each)
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: an empty set is rejected by [`DelimiterSet::new`]
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Delimiter bytes in declaration order
    #[inline(always)]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline(always)]
    pub fn vectors(&self) -> &[DelimiterVector] {
        &self.vectors
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.bytes.contains(&byte)
    }
}
