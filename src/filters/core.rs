//! Core utilities shared by the filters.
//!
//! This module provides:
//! - Luminance weights and u8 narrowing helpers
//! - Reflect-mode boundary indexing
//! - Gaussian kernel generation and a separable plane blur
//! - Row-parallel output construction (rayon)

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use rayon::prelude::*;

/// Luminance weights (ITU-R BT.601 as used by the translator front ends).
pub const LUMA_R: f32 = 0.2989;
pub const LUMA_G: f32 = 0.5870;
pub const LUMA_B: f32 = 0.1140;

/// Largest Gaussian kernel radius, in pixels.
pub const MAX_KERNEL_RADIUS: usize = 1024;

/// Weighted luminance of one RGB pixel, full float precision.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

/// Narrow to u8 by truncation after clamping to [0, 255].
#[inline]
pub fn truncate_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0) as u8
}

/// Narrow to u8 by rounding to nearest after clamping to [0, 255].
#[inline]
pub fn round_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Map a possibly out-of-range index back into `0..len` by mirroring
/// about the edges, repeating the edge sample (`d c b a | a b c d`).
///
/// `len` must be non-zero.
#[inline]
pub fn reflect_index(i: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = i.rem_euclid(period);
    if m >= len as isize {
        (period - 1 - m) as usize
    } else {
        m as usize
    }
}

/// Generate a normalized 1D Gaussian kernel.
///
/// The kernel radius is `truncate * sigma` rounded to the nearest integer,
/// so `sigma = 1.0, truncate = 4.0` yields 9 taps. The radius is capped at
/// [`MAX_KERNEL_RADIUS`].
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian
/// * `truncate` - Kernel extent in standard deviations
pub fn gaussian_kernel_1d(sigma: f32, truncate: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    let half = ((truncate * sigma + 0.5) as usize).min(MAX_KERNEL_RADIUS);
    let mut kernel: Vec<f32> = (0..=2 * half)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Fill a row-major buffer `row_len` values at a time.
///
/// `fill(y, row)` receives row `y` as a flat slice. Rows are independent,
/// so with `parallel` set they are filled on the rayon pool.
fn fill_flat<T, F>(flat: &mut [T], row_len: usize, parallel: bool, fill: &F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_len == 0 {
        return;
    }
    if parallel {
        flat.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill(y, row));
    } else {
        flat.chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| fill(y, row));
    }
}

/// Build an (H, W, C) image row by row.
///
/// Each row is handed to `fill` as a flat `W * C` slice, indexed
/// `x * channels + c`.
pub fn fill_rows<T, F>(shape: (usize, usize, usize), parallel: bool, fill: F) -> Array3<T>
where
    T: Copy + Default + Send + Sync,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    let mut output = Array3::<T>::default(shape);
    if let Some(flat) = output.as_slice_mut() {
        fill_flat(flat, shape.1 * shape.2, parallel, &fill);
    }
    output
}

/// Build an (H, W) plane row by row, see [`fill_rows`].
pub fn fill_plane<T, F>(shape: (usize, usize), parallel: bool, fill: F) -> Array2<T>
where
    T: Copy + Default + Send + Sync,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    let mut output = Array2::<T>::default(shape);
    if let Some(flat) = output.as_slice_mut() {
        fill_flat(flat, shape.1, parallel, &fill);
    }
    output
}

/// Extract one channel of a u8 image as an f32 plane.
pub fn channel_plane(input: ArrayView3<u8>, channel: usize) -> Array2<f32> {
    input.index_axis(Axis(2), channel).mapv(|v| v as f32)
}

/// Separable Gaussian blur of a float plane with reflect boundaries.
///
/// # Arguments
/// * `plane` - (H, W) values
/// * `sigma` - Standard deviation; `<= 0` returns a copy
/// * `truncate` - Kernel extent in standard deviations
/// * `parallel` - Fill rows on the rayon pool
pub fn gaussian_blur_plane(
    plane: ArrayView2<f32>,
    sigma: f32,
    truncate: f32,
    parallel: bool,
) -> Array2<f32> {
    let (height, width) = plane.dim();
    if sigma <= 0.0 || height == 0 || width == 0 {
        return plane.to_owned();
    }

    let kernel = gaussian_kernel_1d(sigma, truncate);
    let half = (kernel.len() / 2) as isize;

    // Horizontal pass
    let temp = fill_plane((height, width), parallel, |y, row| {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sx = reflect_index(x as isize + ki as isize - half, width);
                sum += plane[[y, sx]] * kv;
            }
            row[x] = sum;
        }
    });

    // Vertical pass
    fill_plane((height, width), parallel, |y, row| {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (ki, &kv) in kernel.iter().enumerate() {
                let sy = reflect_index(y as isize + ki as isize - half, height);
                sum += temp[[sy, x]] * kv;
            }
            row[x] = sum;
        }
    })
}
