//! I/O utilities for loading input into padded buffers

use crate::error::{Result, SplitError};
use crate::memory::{aligned_free, allocate_padded_buffer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::ptr::NonNull;

/// Owned input with zeroed padding past the end for whole-window reads
///
/// The first `len()` bytes are the data; the following `padding()` bytes
/// are readable zeros. Padding is always at least one vector width, which
/// is what lets [`Splitter::split_padded`](crate::Splitter::split_padded)
/// load the final window straight from the buffer.
pub struct PaddedBuffer {
    ptr: NonNull<u8>,
    length: usize,
    padding: usize,
}

// SAFETY: the buffer uniquely owns its allocation and exposes it only
// through shared slices.
unsafe impl Send for PaddedBuffer {}
unsafe impl Sync for PaddedBuffer {}

impl PaddedBuffer {
    /// Copy `bytes` into a new padded buffer
    pub fn from_bytes(bytes: &[u8], padding: usize) -> Result<Self> {
        let ptr = allocate_padded_buffer(bytes.len(), padding)?;

        // SAFETY: the allocation holds at least `bytes.len()` bytes and
        // cannot overlap a live borrow.
        unsafe {
            std::ptr::copy_nonoverlapping(bytes.as_ptr(), ptr.as_ptr(), bytes.len());
        }

        Ok(Self {
            ptr,
            length: bytes.len(),
            padding,
        })
    }

    /// Get a slice view of the data (excluding padding)
    #[inline(always)]
    pub fn data(&self) -> &[u8] {
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.length) }
    }

    /// Get the length of the data (excluding padding)
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Check if the buffer is empty
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of readable bytes past the end of the data
    #[inline(always)]
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Get raw pointer to the data
    #[inline(always)]
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }
}

impl Drop for PaddedBuffer {
    fn drop(&mut self) {
        unsafe {
            aligned_free(self.ptr, self.length, self.padding);
        }
    }
}

impl std::fmt::Debug for PaddedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaddedBuffer")
            .field("length", &self.length)
            .field("padding", &self.padding)
            .finish()
    }
}

/// Load a file into memory with padding for whole-window reads
///
/// # Arguments
/// * `path` - Path to the file to load
/// * `padding` - Number of zeroed bytes after the data, at least one vector width
pub fn get_corpus(path: impl AsRef<Path>, padding: usize) -> Result<PaddedBuffer> {
    let path = path.as_ref();
    let load_err = |source| SplitError::Load {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(load_err)?;
    let length = file.metadata().map_err(load_err)?.len() as usize;

    let ptr = allocate_padded_buffer(length, padding)?;
    let buffer = PaddedBuffer {
        ptr,
        length,
        padding,
    };

    // SAFETY: we just allocated this buffer with the correct size and
    // nothing else refers to it yet.
    let slice = unsafe { std::slice::from_raw_parts_mut(ptr.as_ptr(), length) };
    file.read_exact(slice).map_err(load_err)?;

    tracing::debug!(path = %path.display(), length, padding, "loaded corpus");

    Ok(buffer)
}
