//! Exact quarter- and half-turn rotation and vertical mirroring.
//!
//! All functions accept any channel count and never resample.
//!
//! ## Rotation Direction
//!
//! - 90° CCW: source (y, x) -> output (W - 1 - x, y)
//! - 90° CW:  source (y, x) -> output (x, H - 1 - y)
//! - 180°:    source (y, x) -> output (H - 1 - y, W - 1 - x)

use ndarray::{Array3, ArrayView3};

/// Rotate image 90 degrees counter-clockwise.
///
/// # Arguments
/// * `image` - Input image (H, W, C)
///
/// # Returns
/// Rotated image (W, H, C) - note dimensions are swapped
pub fn rotate_90_ccw_u8(image: ArrayView3<u8>) -> Array3<u8> {
    let (h, w, c) = image.dim();
    let mut result = Array3::<u8>::zeros((w, h, c));

    for y in 0..h {
        for x in 0..w {
            let new_y = w - 1 - x;
            let new_x = y;
            for ch in 0..c {
                result[[new_y, new_x, ch]] = image[[y, x, ch]];
            }
        }
    }

    result
}

/// Rotate image 90 degrees clockwise.
pub fn rotate_90_cw_u8(image: ArrayView3<u8>) -> Array3<u8> {
    let (h, w, c) = image.dim();
    let mut result = Array3::<u8>::zeros((w, h, c));

    for y in 0..h {
        for x in 0..w {
            let new_y = x;
            let new_x = h - 1 - y;
            for ch in 0..c {
                result[[new_y, new_x, ch]] = image[[y, x, ch]];
            }
        }
    }

    result
}

/// Rotate image 180 degrees; shape is unchanged.
pub fn rotate_180_u8(image: ArrayView3<u8>) -> Array3<u8> {
    let (h, w, _) = image.dim();
    Array3::from_shape_fn(image.dim(), |(y, x, ch)| image[[h - 1 - y, w - 1 - x, ch]])
}

/// Mirror rows top-to-bottom (upside down).
pub fn flip_vertical_u8(image: ArrayView3<u8>) -> Array3<u8> {
    let (h, _, _) = image.dim();
    Array3::from_shape_fn(image.dim(), |(y, x, ch)| image[[h - 1 - y, x, ch]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(h: usize, w: usize, c: usize) -> Array3<u8> {
        Array3::from_shape_fn((h, w, c), |(y, x, ch)| (y * 40 + x * 4 + ch) as u8)
    }

    #[test]
    fn test_rotate_ccw_moves_top_right_to_top_left() {
        // 2x3 single channel:
        // 0 1 2
        // 3 4 5
        let img = Array3::from_shape_fn((2, 3, 1), |(y, x, _)| (y * 3 + x) as u8);
        let result = rotate_90_ccw_u8(img.view());
        assert_eq!(result.dim(), (3, 2, 1));
        // Expected:
        // 2 5
        // 1 4
        // 0 3
        let expected = [[2, 5], [1, 4], [0, 3]];
        for y in 0..3 {
            for x in 0..2 {
                assert_eq!(result[[y, x, 0]], expected[y][x]);
            }
        }
    }

    #[test]
    fn test_rotate_cw_inverts_ccw() {
        let img = numbered(3, 5, 3);
        let back = rotate_90_cw_u8(rotate_90_ccw_u8(img.view()).view());
        assert_eq!(back, img);
    }

    #[test]
    fn test_rotate_four_times_is_identity() {
        let img = numbered(4, 7, 1);
        let mut result = img.clone();
        for _ in 0..4 {
            result = rotate_90_ccw_u8(result.view());
        }
        assert_eq!(result, img);
    }

    #[test]
    fn test_rotate_180_equals_two_quarter_turns() {
        let img = numbered(3, 5, 3);
        let result = rotate_180_u8(img.view());
        assert_eq!(result.dim(), (3, 5, 3));
        assert_eq!(result[[0, 0, 1]], img[[2, 4, 1]]);
        assert_eq!(result, rotate_90_ccw_u8(rotate_90_ccw_u8(img.view()).view()));
        assert_eq!(rotate_180_u8(result.view()), img);
    }

    #[test]
    fn test_flip_vertical() {
        let img = numbered(3, 2, 3);
        let result = flip_vertical_u8(img.view());
        assert_eq!(result.dim(), img.dim());
        assert_eq!(result[[0, 1, 2]], img[[2, 1, 2]]);
        assert_eq!(flip_vertical_u8(result.view()), img);
    }
}
