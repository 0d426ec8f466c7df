//! Grayscale conversion.
//!
//! Uses the weights in [`super::core`] (`0.2989 R + 0.5870 G + 0.1140 B`).
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - returned unchanged
//! - **RGB**: (height, width, 3) - collapsed to one luminance channel
//! - **RGBA**: (height, width, 4) - alpha is ignored, RGB collapsed
//!
//! Three precisions are provided because the filters disagree on when to
//! narrow: `grayscale` rounds, `threshold` truncates, and edge detection
//! keeps the float value.

use ndarray::{Array2, Array3, ArrayView3, Axis};

use super::core::{luminance, round_u8, truncate_u8};

/// Convert to a single-channel image, rounding luminance to nearest.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// (height, width, 1) image. Single-channel input is copied as-is.
pub fn grayscale_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if channels == 1 {
        return input.to_owned();
    }

    let mut output = Array3::<u8>::zeros((height, width, 1));
    for y in 0..height {
        for x in 0..width {
            let lum = luminance(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
            output[[y, x, 0]] = round_u8(lum);
        }
    }
    output
}

/// Luminance plane in float precision (no narrowing).
pub fn luminance_f32(input: ArrayView3<u8>) -> Array2<f32> {
    let (height, width, channels) = input.dim();
    if channels == 1 {
        return input.index_axis(Axis(2), 0).mapv(|v| v as f32);
    }

    Array2::from_shape_fn((height, width), |(y, x)| {
        luminance(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]])
    })
}

/// Luminance plane truncated to u8.
pub fn luminance_truncated_u8(input: ArrayView3<u8>) -> Array2<u8> {
    let (_, _, channels) = input.dim();
    if channels == 1 {
        return input.index_axis(Axis(2), 0).to_owned();
    }
    luminance_f32(input).mapv(truncate_u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn rgb_pixel(r: u8, g: u8, b: u8) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((1, 1, 3));
        img[[0, 0, 0]] = r;
        img[[0, 0, 1]] = g;
        img[[0, 0, 2]] = b;
        img
    }

    #[test]
    fn test_grayscale_primaries() {
        // 0.2989 * 255 = 76.22
        assert_eq!(grayscale_u8(rgb_pixel(255, 0, 0).view())[[0, 0, 0]], 76);
        // 0.5870 * 255 = 149.69
        assert_eq!(grayscale_u8(rgb_pixel(0, 255, 0).view())[[0, 0, 0]], 150);
        // 0.1140 * 255 = 29.07
        assert_eq!(grayscale_u8(rgb_pixel(0, 0, 255).view())[[0, 0, 0]], 29);
        // weights sum to 0.9999
        assert_eq!(grayscale_u8(rgb_pixel(255, 255, 255).view())[[0, 0, 0]], 255);
    }

    #[test]
    fn test_grayscale_collapses_channels() {
        let img = Array3::<u8>::from_elem((3, 5, 3), 40);
        let result = grayscale_u8(img.view());
        assert_eq!(result.dim(), (3, 5, 1));
        assert!(result.iter().all(|&v| v == 40));
    }

    #[test]
    fn test_grayscale_single_channel_passthrough() {
        let img = Array3::from_shape_fn((2, 3, 1), |(y, x, _)| (y * 10 + x) as u8);
        assert_eq!(grayscale_u8(img.view()), img);
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let mut img = Array3::<u8>::zeros((1, 1, 4));
        img[[0, 0, 0]] = 255;
        img[[0, 0, 3]] = 10;
        let result = grayscale_u8(img.view());
        assert_eq!(result.dim(), (1, 1, 1));
        assert_eq!(result[[0, 0, 0]], 76);
    }

    #[test]
    fn test_luminance_precisions_differ() {
        let img = rgb_pixel(0, 255, 0);
        let float = luminance_f32(img.view());
        assert!((float[[0, 0]] - 149.685).abs() < 1e-3);
        assert_eq!(luminance_truncated_u8(img.view())[[0, 0]], 149);
        assert_eq!(grayscale_u8(img.view())[[0, 0, 0]], 150);
    }
}
