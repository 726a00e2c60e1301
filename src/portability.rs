//! Portable bit operations on window masks

use crate::VECTOR_WIDTH;

/// Index of the lowest set bit of a window mask
#[inline(always)]
pub fn trailing_zeros(x: u16) -> u32 {
    x.trailing_zeros()
}

/// Clear the lowest set bit
#[inline(always)]
pub fn clear_lowest_bit(x: u16) -> u16 {
    x & x.wrapping_sub(1)
}

/// Count number of set bits (Hamming weight/popcount)
#[inline(always)]
pub fn hamming(x: u16) -> u32 {
    x.count_ones()
}

/// Mask with the low `valid_lanes` bits set
///
/// Used to drop matches in lanes past the logical end of the input.
/// Values of `VECTOR_WIDTH` or more select every lane.
#[inline(always)]
pub fn lane_mask(valid_lanes: usize) -> u16 {
    if valid_lanes >= VECTOR_WIDTH {
        u16::MAX
    } else {
        (1u16 << valid_lanes) - 1
    }
}
