//! Sobel edge detection.
//!
//! The image is reduced to a float luminance plane, optionally smoothed,
//! and differentiated with the separable Sobel pair: a `[-1, 0, 1]`
//! derivative along one axis combined with `[1, 2, 1]` smoothing along the
//! other. Borders reflect (`d c b a | a b c d`), so every pixel, including
//! those of a 1×1 image, gets a gradient.
//!
//! Output is always a single channel, either scaled so the strongest edge
//! is 255 or, with [`EdgeParams::binary_threshold`] set, a 0/255 mask.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use serde::{Deserialize, Serialize};

use super::core::{fill_plane, gaussian_blur_plane, reflect_index, truncate_u8};
use super::grayscale::luminance_f32;

/// Tuning for [`edge_detection_u8`].
///
/// The default is the plain normalized Sobel magnitude.
/// [`EdgeParams::strict`] enables pre-smoothing, contrast boost and a
/// mean-relative noise floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    /// Gaussian sigma applied to the luminance plane before Sobel; 0 disables.
    pub presmooth_sigma: f32,
    /// Multiplier applied after normalization, then clamped to 255.
    pub contrast: f32,
    /// Magnitudes below `mean_cutoff * mean(magnitude)` are zeroed.
    pub mean_cutoff: f32,
    /// When set, raw magnitudes strictly above this become 255 and all
    /// others 0; normalization and `contrast` are skipped.
    pub binary_threshold: Option<f32>,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            presmooth_sigma: 0.0,
            contrast: 1.0,
            mean_cutoff: 0.0,
            binary_threshold: None,
        }
    }
}

impl EdgeParams {
    pub fn strict() -> Self {
        Self {
            presmooth_sigma: 1.0,
            contrast: 1.5,
            mean_cutoff: 0.6,
            binary_threshold: None,
        }
    }
}

/// Gradient magnitude `sqrt(Gx² + Gy²)` of a float plane.
pub fn sobel_magnitude(plane: ArrayView2<f32>, parallel: bool) -> Array2<f32> {
    let (height, width) = plane.dim();
    let at = |y: isize, x: isize| plane[[reflect_index(y, height), reflect_index(x, width)]];

    // Pass 1 along x: derivative and smoothing
    let deriv_x = fill_plane((height, width), parallel, |y, row| {
        let y = y as isize;
        for x in 0..width {
            let x = x as isize;
            row[x as usize] = at(y, x + 1) - at(y, x - 1);
        }
    });
    let smooth_x = fill_plane((height, width), parallel, |y, row| {
        let y = y as isize;
        for x in 0..width {
            let x = x as isize;
            row[x as usize] = at(y, x - 1) + 2.0 * at(y, x) + at(y, x + 1);
        }
    });

    // Pass 2 along y: smooth the x-derivative, differentiate the x-smoothing
    fill_plane((height, width), parallel, |y, row| {
        let up = reflect_index(y as isize - 1, height);
        let down = reflect_index(y as isize + 1, height);
        for x in 0..width {
            let gx = deriv_x[[up, x]] + 2.0 * deriv_x[[y, x]] + deriv_x[[down, x]];
            let gy = smooth_x[[down, x]] - smooth_x[[up, x]];
            row[x] = (gx * gx + gy * gy).sqrt();
        }
    })
}

/// Detect edges and return a normalized single-channel magnitude image.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (alpha ignored)
/// * `params` - Smoothing, contrast and noise floor
/// * `truncate` - Gaussian kernel extent in standard deviations
/// * `parallel` - Fill rows on the rayon pool
///
/// # Returns
/// (height, width, 1) image. A uniform input (zero maximum gradient)
/// yields all zeros in either mode.
pub fn edge_detection_u8(
    input: ArrayView3<u8>,
    params: &EdgeParams,
    truncate: f32,
    parallel: bool,
) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let mut plane = luminance_f32(input);
    if params.presmooth_sigma > 0.0 {
        plane = gaussian_blur_plane(plane.view(), params.presmooth_sigma, truncate, parallel);
    }

    let mut magnitude = sobel_magnitude(plane.view(), parallel);

    if params.mean_cutoff > 0.0 {
        let floor = params.mean_cutoff * magnitude.mean().unwrap_or(0.0);
        magnitude.mapv_inplace(|m| if m < floor { 0.0 } else { m });
    }

    let mut output = Array3::<u8>::zeros((height, width, 1));
    if let Some(threshold) = params.binary_threshold {
        for ((y, x), &m) in magnitude.indexed_iter() {
            if m > threshold {
                output[[y, x, 0]] = 255;
            }
        }
        return output;
    }

    let max = magnitude.iter().copied().fold(0.0f32, f32::max);
    if max <= 0.0 {
        return output;
    }

    let gain = 255.0 * params.contrast;
    for ((y, x), &m) in magnitude.indexed_iter() {
        output[[y, x, 0]] = truncate_u8(m / max * gain);
    }
    output
}
