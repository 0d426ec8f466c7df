//! Unsharp mask sharpening.
//!
//! Each channel is sharpened independently:
//! `out = clamp(orig + amount * (orig - gaussian(orig)), 0, 255)`.
//! With `amount = 1.0` this is `2 * orig - blurred`.

use ndarray::{Array3, ArrayView3, Axis};

use super::core::{channel_plane, gaussian_blur_plane, round_u8};

/// Apply unsharp masking - u8 version.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `sigma` - Gaussian sigma of the blurred copy
/// * `amount` - Weight of the high-frequency detail added back
/// * `truncate` - Gaussian kernel extent in standard deviations
/// * `parallel` - Fill rows on the rayon pool
///
/// # Returns
/// Sharpened image with same dimensions
pub fn unsharp_mask_u8(
    input: ArrayView3<u8>,
    sigma: f32,
    amount: f32,
    truncate: f32,
    parallel: bool,
) -> Array3<u8> {
    let mut output = Array3::<u8>::zeros(input.dim());

    for (c, mut out_channel) in output.axis_iter_mut(Axis(2)).enumerate() {
        let original = channel_plane(input, c);
        let blurred = gaussian_blur_plane(original.view(), sigma, truncate, parallel);

        out_channel
            .indexed_iter_mut()
            .for_each(|((y, x), o)| {
                let v = original[[y, x]];
                *o = round_u8(v + amount * (v - blurred[[y, x]]));
            });
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsharp_uniform_unchanged() {
        let img = Array3::<u8>::from_elem((5, 6, 3), 90);
        assert_eq!(unsharp_mask_u8(img.view(), 1.0, 1.0, 4.0, false), img);
    }

    #[test]
    fn test_unsharp_amplifies_step() {
        let img = Array3::from_shape_fn((5, 8, 1), |(_, x, _)| if x < 4 { 100 } else { 150 });
        let result = unsharp_mask_u8(img.view(), 1.0, 1.0, 4.0, false);
        // Dark side of the edge gets darker, bright side brighter
        assert!(result[[2, 3, 0]] < 100);
        assert!(result[[2, 4, 0]] > 150);
        // Far from the edge nothing changes much
        assert!((result[[2, 0, 0]] as i32 - 100).abs() <= 1);
    }

    #[test]
    fn test_unsharp_clamps_to_range() {
        let img = Array3::from_shape_fn((3, 6, 3), |(_, x, _)| if x < 3 { 0 } else { 255 });
        let result = unsharp_mask_u8(img.view(), 1.0, 1.0, 4.0, false);
        assert_eq!(result[[1, 2, 0]], 0);
        assert_eq!(result[[1, 3, 0]], 255);
    }

    #[test]
    fn test_unsharp_zero_sigma_is_identity() {
        let img = Array3::from_shape_fn((4, 4, 3), |(y, x, c)| (y * 50 + x * 10 + c) as u8);
        assert_eq!(unsharp_mask_u8(img.view(), 0.0, 1.0, 4.0, true), img);
    }
}
