//! Blur filters: interior box blur and Gaussian blur.
//!
//! ## Boundary Handling
//!
//! The box blur only rewrites pixels whose full k×k neighborhood lies
//! inside the image; the `k / 2` pixel margin is copied from the input.
//! The Gaussian blur reflects at the borders (`d c b a | a b c d`).
//!
//! Channels are processed independently, alpha included.

use ndarray::{Array3, ArrayView3, Axis};

use super::core::{channel_plane, fill_rows, gaussian_blur_plane, round_u8};

/// Apply a k×k box blur to the interior of the image.
///
/// Interior pixels (rows and columns `k/2 ..= dim - k/2 - 1`) become the
/// truncated integer mean of their neighborhood. Images smaller than the
/// kernel have no interior and are returned unchanged, as are kernels of
/// size 0 or 1.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `kernel_size` - Odd kernel edge length
/// * `parallel` - Fill rows on the rayon pool
///
/// # Returns
/// Blurred image with same dimensions
pub fn box_blur_interior_u8(input: ArrayView3<u8>, kernel_size: usize, parallel: bool) -> Array3<u8> {
    if kernel_size <= 1 {
        return input.to_owned();
    }

    let (height, width, channels) = input.dim();
    let half = kernel_size / 2;
    let count = (kernel_size as u64).saturating_mul(kernel_size as u64);

    fill_rows((height, width, channels), parallel, |y, row| {
        let interior_row = y >= half && y + half < height;
        for x in 0..width {
            let interior = interior_row && x >= half && x + half < width;
            for c in 0..channels {
                if !interior {
                    row[x * channels + c] = input[[y, x, c]];
                    continue;
                }

                let mut sum = 0u64;
                for sy in y - half..=y + half {
                    for sx in x - half..=x + half {
                        sum += input[[sy, sx, c]] as u64;
                    }
                }
                row[x * channels + c] = (sum / count) as u8;
            }
        }
    })
}

/// Apply Gaussian blur to every channel.
///
/// # Arguments
/// * `input` - Image (height, width, channels)
/// * `sigma` - Standard deviation of the kernel; `<= 0` returns a copy
/// * `truncate` - Kernel extent in standard deviations
/// * `parallel` - Fill rows on the rayon pool
///
/// # Returns
/// Blurred image, rounded to u8, same dimensions
pub fn gaussian_blur_u8(input: ArrayView3<u8>, sigma: f32, truncate: f32, parallel: bool) -> Array3<u8> {
    if sigma <= 0.0 {
        return input.to_owned();
    }

    let mut output = Array3::<u8>::zeros(input.dim());
    for (c, mut out_channel) in output.axis_iter_mut(Axis(2)).enumerate() {
        let blurred = gaussian_blur_plane(channel_plane(input, c).view(), sigma, truncate, parallel);
        out_channel.zip_mut_with(&blurred, |o, &b| *o = round_u8(b));
    }
    output
}
