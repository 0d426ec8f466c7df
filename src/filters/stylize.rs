//! Binary threshold.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - thresholds the single channel
//! - **RGB / RGBA**: luminance first (truncated to u8), alpha ignored
//!
//! Output is always a single channel containing only 0 and 255.

use ndarray::{Array3, ArrayView3, Axis};

use super::grayscale::luminance_truncated_u8;

/// Apply binary threshold - u8 version.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `cutoff` - Pixels strictly above this become 255, the rest 0
///
/// # Returns
/// (height, width, 1) black and white image
pub fn threshold_u8(input: ArrayView3<u8>, cutoff: u8) -> Array3<u8> {
    luminance_truncated_u8(input)
        .mapv(|lum| if lum > cutoff { 255 } else { 0 })
        .insert_axis(Axis(2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strictly_greater() {
        let img = Array3::from_shape_fn((1, 3, 1), |(_, x, _)| [127u8, 128, 129][x]);
        let result = threshold_u8(img.view(), 128);
        assert_eq!(result[[0, 0, 0]], 0);
        assert_eq!(result[[0, 1, 0]], 0);
        assert_eq!(result[[0, 2, 0]], 255);
    }

    #[test]
    fn test_threshold_rgb_truncates_luminance() {
        // Luminance of (129, 128, 128) is 128.2861 -> 128 -> not above cutoff
        let mut img = Array3::<u8>::from_elem((1, 1, 3), 128);
        img[[0, 0, 0]] = 129;
        let result = threshold_u8(img.view(), 128);
        assert_eq!(result.dim(), (1, 1, 1));
        assert_eq!(result[[0, 0, 0]], 0);
    }

    #[test]
    fn test_threshold_binary_output() {
        let img = Array3::from_shape_fn((6, 7, 3), |(y, x, c)| ((y * 45 + x * 33 + c * 71) % 256) as u8);
        let result = threshold_u8(img.view(), 128);
        assert!(result.iter().all(|&v| v == 0 || v == 255));
    }
}
