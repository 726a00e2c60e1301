//! Block scanner: one 16-byte window in, one 16-bit match mask out
//!
//! Each backend compares the window against every delimiter vector, ORs
//! the lane masks together and packs the result into a `u16` whose bit *i*
//! is set iff byte *i* of the window is a delimiter. SSE2 and NEON are part
//! of the x86_64 and aarch64 baselines, so no runtime detection is needed.

use crate::delimiters::DelimiterSet;
use crate::VECTOR_WIDTH;

#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[cfg(target_arch = "aarch64")]
use std::arch::aarch64::*;

/// A zero-filled, 16-aligned window used for the short final block
#[repr(C, align(16))]
#[derive(Clone, Copy, Debug)]
pub struct Window(pub [u8; VECTOR_WIDTH]);

impl Window {
    /// Copy up to one window of `bytes`, zero-filling the remaining lanes
    #[inline(always)]
    pub fn partial(bytes: &[u8]) -> Self {
        let n = bytes.len().min(VECTOR_WIDTH);
        let mut lanes = [0u8; VECTOR_WIDTH];
        lanes[..n].copy_from_slice(&bytes[..n]);
        Self(lanes)
    }
}

/// Match mask for one full window
#[inline(always)]
pub fn scan_window(window: &[u8; VECTOR_WIDTH], delimiters: &DelimiterSet) -> u16 {
    // SAFETY: `window` is exactly one vector width of readable memory.
    unsafe { scan_block(window.as_ptr(), delimiters) }
}

/// Match mask for the window starting at `ptr`
///
/// # Safety
/// `ptr` must be valid for reads of `VECTOR_WIDTH` bytes.
#[cfg(target_arch = "x86_64")]
#[inline(always)]
pub unsafe fn scan_block(ptr: *const u8, delimiters: &DelimiterSet) -> u16 {
    let Some((first, rest)) = delimiters.vectors().split_first() else {
        return 0;
    };

    let input = _mm_loadu_si128(ptr as *const __m128i);
    let mut mask = _mm_cmpeq_epi8(input, _mm_load_si128(first.as_ptr() as *const __m128i));
    for needle in rest {
        let needle = _mm_load_si128(needle.as_ptr() as *const __m128i);
        mask = _mm_or_si128(mask, _mm_cmpeq_epi8(input, needle));
    }

    _mm_movemask_epi8(mask) as u16
}

/// Match mask for the window starting at `ptr`
///
/// # Safety
/// `ptr` must be valid for reads of `VECTOR_WIDTH` bytes.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
pub unsafe fn scan_block(ptr: *const u8, delimiters: &DelimiterSet) -> u16 {
    let Some((first, rest)) = delimiters.vectors().split_first() else {
        return 0;
    };

    let input = vld1q_u8(ptr);
    let mut mask = vceqq_u8(input, vld1q_u8(first.as_ptr()));
    for needle in rest {
        mask = vorrq_u8(mask, vceqq_u8(input, vld1q_u8(needle.as_ptr())));
    }

    neon_movemask(mask)
}

/// Pack the high bit of each lane into a `u16`
///
/// Lanes are all-ones or all-zeros after a compare, so masking each lane
/// with its bit weight and summing each half gives the packed bits.
#[cfg(target_arch = "aarch64")]
#[inline(always)]
unsafe fn neon_movemask(input: uint8x16_t) -> u16 {
    const WEIGHTS: [u8; VECTOR_WIDTH] = [1, 2, 4, 8, 16, 32, 64, 128, 1, 2, 4, 8, 16, 32, 64, 128];

    let bits = vandq_u8(input, vld1q_u8(WEIGHTS.as_ptr()));
    let low = vaddv_u8(vget_low_u8(bits)) as u16;
    let high = vaddv_u8(vget_high_u8(bits)) as u16;
    low | (high << 8)
}

/// Match mask for the window starting at `ptr`
///
/// # Safety
/// `ptr` must be valid for reads of `VECTOR_WIDTH` bytes.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
pub unsafe fn scan_block(ptr: *const u8, delimiters: &DelimiterSet) -> u16 {
    let window = &*(ptr as *const [u8; VECTOR_WIDTH]);
    scan_window_scalar(window, delimiters)
}

/// Lane-at-a-time reference scanner
///
/// Same contract as [`scan_window`]; used on targets without a SIMD
/// backend and as the oracle the SIMD paths are tested against.
pub fn scan_window_scalar(window: &[u8; VECTOR_WIDTH], delimiters: &DelimiterSet) -> u16 {
    let mut mask = 0u16;
    for needle in delimiters.vectors() {
        for (lane, (&byte, &delim)) in window.iter().zip(needle.0.iter()).enumerate() {
            if byte == delim {
                mask |= 1 << lane;
            }
        }
    }
    mask
}
