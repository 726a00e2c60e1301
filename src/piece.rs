//! Non-owning token views

use std::borrow::Cow;
use std::fmt;
use std::ops::{Deref, Index, Range};

/// A token borrowed from the buffer that was split
///
/// Holds the token bytes and the absolute offset where they start in the
/// source buffer. A piece never owns or copies its bytes: it stays valid
/// only as long as the source buffer is alive and unmodified. The lifetime
/// `'a` makes the compiler hold callers to that, which means a buffer cannot
/// be freed, mutated or reallocated while pieces of it are still around.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrPiece<'a> {
    bytes: &'a [u8],
    start: usize,
}

impl<'a> StrPiece<'a> {
    /// Piece covering `buf[range]`
    ///
    /// Panics if the range is out of bounds, like slice indexing.
    #[inline(always)]
    pub fn new(buf: &'a [u8], range: Range<usize>) -> Self {
        let start = range.start;
        Self {
            bytes: &buf[range],
            start,
        }
    }

    /// Empty piece at offset 0
    pub const fn empty() -> Self {
        Self { bytes: &[], start: 0 }
    }

    /// Offset of the first byte in the source buffer
    #[inline(always)]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last byte in the source buffer
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.start + self.bytes.len()
    }

    /// Source buffer range covered by this piece
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Token bytes, borrowed for the full lifetime of the source buffer
    #[inline(always)]
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Token as UTF-8, if it is valid
    pub fn as_str(&self) -> Result<&'a str, std::str::Utf8Error> {
        std::str::from_utf8(self.bytes)
    }

    /// Token as text, replacing invalid UTF-8 sequences
    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes)
    }

    /// Owned copy of the token bytes
    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

impl Default for StrPiece<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl Deref for StrPiece<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.bytes
    }
}

impl AsRef<[u8]> for StrPiece<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl Index<usize> for StrPiece<'_> {
    type Output = u8;

    fn index(&self, i: usize) -> &u8 {
        &self.bytes[i]
    }
}

impl PartialEq<[u8]> for StrPiece<'_> {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<&[u8]> for StrPiece<'_> {
    fn eq(&self, other: &&[u8]) -> bool {
        self.bytes == *other
    }
}

impl PartialEq<str> for StrPiece<'_> {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for StrPiece<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl fmt::Debug for StrPiece<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{} {:?}", self.start, self.end(), self.to_string_lossy())
    }
}

impl fmt::Display for StrPiece<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}
