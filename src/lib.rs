//! Manuscript image filters
//!
//! Image preprocessing for the ancient script translator: one call takes a
//! decoded raster and an algorithm name and returns the filtered raster.
//! Python bindings come via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are `(height, width, channels)` u8 arrays:
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - alpha is discarded or carried through,
//!   see [`params::AlphaPolicy`]
//!
//! ## Algorithms
//! `none`, `grayscale`, `rotate`, `blur`, `edge_detection`, `sharpen`,
//! `threshold`, `invert`, `flip_vertical` and `gaussian_blur`. Any other
//! name is treated as `none`.
//!
//! ## Example
//! ```
//! use ndarray::Array3;
//! use manuscript_filters::process_image;
//!
//! let img = Array3::<u8>::from_elem((4, 6, 3), 200);
//! let gray = process_image(img.view(), "grayscale").unwrap();
//! assert_eq!(gray.dim(), (4, 6, 1));
//! ```

pub mod engine;
pub mod error;
pub mod filters;
pub mod image;
pub mod params;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use engine::{process_image, Algorithm, FilterEngine};
pub use error::{FilterError, Result};
pub use params::{AlphaPolicy, FilterParams, RotationDirection, PARAMS_VERSION};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::engine::{Algorithm, FilterEngine};
    use crate::error::FilterError;

    fn to_py_err(err: FilterError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    fn engine(params: Option<&str>) -> PyResult<FilterEngine> {
        match params {
            Some(json) => FilterEngine::from_json(json).map_err(to_py_err),
            None => Ok(FilterEngine::default()),
        }
    }

    /// Apply one named algorithm to a (H, W, C) u8 array.
    ///
    /// Unknown names return the input unchanged. `params` is an optional
    /// JSON parameter set; missing fields take their defaults.
    #[pyfunction]
    #[pyo3(signature = (image, algorithm, params=None))]
    pub fn process_image<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        algorithm: &str,
        params: Option<&str>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let result = engine(params)?
            .apply_named(image.as_array(), algorithm)
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Apply several named algorithms in order.
    #[pyfunction]
    #[pyo3(signature = (image, algorithms, params=None))]
    pub fn process_pipeline<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        algorithms: Vec<String>,
        params: Option<&str>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let stages: Vec<Algorithm> = algorithms.iter().map(|name| Algorithm::from_name(name)).collect();
        let result = engine(params)?
            .apply_pipeline(image.as_array(), &stages)
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Names accepted by `process_image`.
    #[pyfunction]
    pub fn algorithms() -> Vec<&'static str> {
        Algorithm::ALL.iter().map(|alg| alg.as_str()).collect()
    }

    /// Manuscript filters extension module
    #[pymodule]
    pub fn manuscript_filters(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(process_image, m)?)?;
        m.add_function(wrap_pyfunction!(process_pipeline, m)?)?;
        m.add_function(wrap_pyfunction!(algorithms, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::manuscript_filters;
