//! Pixel-wise tone adjustments.

use ndarray::{Array3, ArrayView3};

/// Invert every channel: `255 - v`.
///
/// The engine splits alpha off before calling this, so every channel
/// passed in is a color channel.
pub fn invert_u8(input: ArrayView3<u8>) -> Array3<u8> {
    input.mapv(|v| 255 - v)
}
