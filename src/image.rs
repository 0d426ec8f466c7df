//! Input shape checks and alpha handling.
//!
//! Images are `(height, width, channels)` u8 arrays. The engine accepts
//! 1, 3 or 4 channels; anything else, or a zero-area image, is rejected
//! before any filter runs.

use ndarray::{s, Array3, ArrayView3};

use crate::error::{FilterError, Result};

/// Reject zero-area images and unsupported channel counts.
pub fn validate_shape(dim: (usize, usize, usize)) -> Result<()> {
    let (height, width, channels) = dim;
    if height == 0 || width == 0 {
        return Err(FilterError::EmptyImage { height, width });
    }
    match channels {
        1 | 3 | 4 => Ok(()),
        other => Err(FilterError::UnsupportedChannels(other)),
    }
}

/// Split a validated image into its color channels and optional alpha.
///
/// 1- and 3-channel images have no alpha. For RGBA the color part is a
/// view of the first three channels and alpha is a (H, W, 1) view.
pub fn split_alpha<'a>(image: ArrayView3<'a, u8>) -> (ArrayView3<'a, u8>, Option<ArrayView3<'a, u8>>) {
    if image.dim().2 != 4 {
        return (image, None);
    }
    let color = image.slice_move(s![.., .., 0..3]);
    let alpha = image.slice_move(s![.., .., 3..4]);
    (color, Some(alpha))
}

/// Wrap a row-major interleaved buffer as an image.
///
/// # Arguments
/// * `data` - `height * width * channels` bytes
/// * `height`, `width`, `channels` - Image dimensions
pub fn from_raw(data: Vec<u8>, height: usize, width: usize, channels: usize) -> Result<Array3<u8>> {
    validate_shape((height, width, channels))?;
    if data.len() != height * width * channels {
        return Err(FilterError::BufferSize {
            len: data.len(),
            height,
            width,
            channels,
        });
    }
    Ok(Array3::from_shape_vec((height, width, channels), data)?)
}
