//! WebAssembly exports for the manuscript filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images cross
//! the boundary as flat row-major byte arrays plus their dimensions, and
//! results carry their own dimensions since rotation, grayscale, edge
//! detection and threshold change the shape.
//!
//! WASM builds run single-threaded: rows are filled serially.

use wasm_bindgen::prelude::*;

use crate::engine::{Algorithm, FilterEngine};
use crate::error::Result;
use crate::image::from_raw;
use crate::params::FilterParams;

/// Filtered image returned to JavaScript.
#[wasm_bindgen]
pub struct FilteredImage {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

#[wasm_bindgen]
impl FilteredImage {
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> usize {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> usize {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Copy of the pixel bytes (length = width * height * channels).
    #[wasm_bindgen(getter)]
    pub fn data(&self) -> Vec<u8> {
        self.data.clone()
    }
}

fn serial_engine(params_json: Option<&str>) -> Result<FilterEngine> {
    let mut params = match params_json {
        Some(json) => FilterParams::from_json(json)?,
        None => FilterParams::default(),
    };
    params.parallel = false;
    FilterEngine::new(params)
}

/// Apply one named algorithm to a flat image buffer.
///
/// # Arguments
/// * `data` - Flat array of bytes (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1, 3 or 4
/// * `algorithm` - Algorithm name; unknown names return the input
/// * `params_json` - Optional JSON parameter set; missing fields take defaults
#[wasm_bindgen]
pub fn process_image_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    algorithm: &str,
    params_json: Option<String>,
) -> std::result::Result<FilteredImage, JsError> {
    let input = from_raw(data.to_vec(), height, width, channels)
        .map_err(|e| JsError::new(&e.to_string()))?;

    let result = serial_engine(params_json.as_deref())
        .and_then(|engine| engine.apply(input.view(), Algorithm::from_name(algorithm)))
        .map_err(|e| JsError::new(&e.to_string()))?;

    let (height, width, channels) = result.dim();
    let data = if result.is_standard_layout() {
        result.into_raw_vec_and_offset().0
    } else {
        result.iter().copied().collect()
    };
    Ok(FilteredImage {
        width,
        height,
        channels,
        data,
    })
}

/// Names accepted by `process_image_wasm`.
#[wasm_bindgen]
pub fn algorithm_names_wasm() -> Vec<String> {
    Algorithm::ALL.iter().map(|alg| alg.as_str().to_string()).collect()
}
