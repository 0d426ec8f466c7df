//! Error type shared by the filter engine and its bindings.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("image has zero area ({height}x{width})")]
    EmptyImage { height: usize, width: usize },

    #[error("unsupported channel count {0}, expected 1, 3 or 4")]
    UnsupportedChannels(usize),

    #[error("buffer of {len} bytes does not match {height}x{width}x{channels}")]
    BufferSize {
        len: usize,
        height: usize,
        width: usize,
        channels: usize,
    },

    #[error("invalid filter parameter: {0}")]
    InvalidParams(String),

    #[error("malformed filter parameters: {0}")]
    ParamsJson(#[from] serde_json::Error),

    #[error("unsupported parameter set version {0}")]
    UnsupportedParamsVersion(u32),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

pub type Result<T> = std::result::Result<T, FilterError>;
