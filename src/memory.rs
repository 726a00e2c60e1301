//! Memory utilities for aligned, padded allocation

use crate::error::{Result, SplitError};
use crate::VECTOR_WIDTH;
use std::alloc::{alloc_zeroed, dealloc, Layout};
use std::ptr::NonNull;

/// Alignment of padded buffers (cache line size)
pub const BUFFER_ALIGN: usize = 64;

/// Allocate zeroed memory for `length` bytes plus `padding` readable bytes
///
/// The padding must cover at least one vector width so that a window
/// starting anywhere inside `length` stays inside the allocation. Padding
/// bytes are zero and are never written afterwards.
///
/// # Safety
/// The returned pointer must be deallocated with `aligned_free`
#[inline]
pub fn allocate_padded_buffer(length: usize, padding: usize) -> Result<NonNull<u8>> {
    if padding < VECTOR_WIDTH {
        return Err(SplitError::InsufficientPadding {
            padding,
            required: VECTOR_WIDTH,
        });
    }

    let total_size = length
        .checked_add(padding)
        .ok_or(SplitError::OutOfMemory { size: usize::MAX })?;
    let layout = Layout::from_size_align(total_size, BUFFER_ALIGN)?;

    // SAFETY: the layout has a non-zero size since padding >= VECTOR_WIDTH
    let ptr = unsafe { alloc_zeroed(layout) };

    NonNull::new(ptr).ok_or(SplitError::OutOfMemory { size: total_size })
}

/// Free memory allocated with `allocate_padded_buffer`
///
/// # Safety
/// - `ptr` must have been allocated with `allocate_padded_buffer`
/// - `length` and `padding` must match the original allocation
/// - `ptr` must not be used after calling this function
#[inline]
pub unsafe fn aligned_free(ptr: NonNull<u8>, length: usize, padding: usize) {
    let total_size = length + padding;
    let layout = Layout::from_size_align_unchecked(total_size, BUFFER_ALIGN);
    dealloc(ptr.as_ptr(), layout);
}
