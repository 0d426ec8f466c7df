//! Filter dispatch.
//!
//! [`FilterEngine`] maps an algorithm selector onto one of the filters in
//! [`crate::filters`]. It holds nothing but its validated parameters, so a
//! single engine can be shared across threads.
//!
//! Unknown algorithm names are not an error: they select
//! [`Algorithm::None`] and the image comes back unchanged.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use ndarray::{concatenate, Array3, ArrayView3, Axis};
use tracing::{debug, warn};

use crate::error::Result;
use crate::filters::blur::{box_blur_interior_u8, gaussian_blur_u8};
use crate::filters::color_adjust::invert_u8;
use crate::filters::edge::edge_detection_u8;
use crate::filters::grayscale::grayscale_u8;
use crate::filters::rotate::{flip_vertical_u8, rotate_180_u8, rotate_90_ccw_u8, rotate_90_cw_u8};
use crate::filters::sharpen::unsharp_mask_u8;
use crate::filters::stylize::threshold_u8;
use crate::image::{split_alpha, validate_shape};
use crate::params::{AlphaPolicy, FilterParams, RotationDirection};

/// Algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    #[default]
    None,
    Grayscale,
    Rotate,
    Blur,
    EdgeDetection,
    Sharpen,
    Threshold,
    Invert,
    FlipVertical,
    GaussianBlur,
}

impl Algorithm {
    pub const ALL: [Algorithm; 10] = [
        Algorithm::None,
        Algorithm::Grayscale,
        Algorithm::Rotate,
        Algorithm::Blur,
        Algorithm::EdgeDetection,
        Algorithm::Sharpen,
        Algorithm::Threshold,
        Algorithm::Invert,
        Algorithm::FlipVertical,
        Algorithm::GaussianBlur,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::None => "none",
            Algorithm::Grayscale => "grayscale",
            Algorithm::Rotate => "rotate",
            Algorithm::Blur => "blur",
            Algorithm::EdgeDetection => "edge_detection",
            Algorithm::Sharpen => "sharpen",
            Algorithm::Threshold => "threshold",
            Algorithm::Invert => "invert",
            Algorithm::FlipVertical => "flip_vertical",
            Algorithm::GaussianBlur => "gaussian_blur",
        }
    }

    /// Exact lookup, ignoring surrounding whitespace and ASCII case.
    pub fn lookup(name: &str) -> Option<Algorithm> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("upside_down") {
            return Some(Algorithm::FlipVertical);
        }
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str().eq_ignore_ascii_case(name))
    }

    /// Resolve a name, falling back to [`Algorithm::None`] for unknown names.
    pub fn from_name(name: &str) -> Algorithm {
        Self::lookup(name).unwrap_or_else(|| {
            warn!(name, "unknown image algorithm, using none");
            Algorithm::None
        })
    }

    /// Filters that move pixels without changing their values.
    fn is_geometric(self) -> bool {
        matches!(self, Algorithm::Rotate | Algorithm::FlipVertical)
    }
}

impl FromStr for Algorithm {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Algorithm::from_name(s))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stateless filter engine configured by a [`FilterParams`].
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    params: FilterParams,
}

impl FilterEngine {
    pub fn new(params: FilterParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Build an engine from a JSON parameter set, see [`FilterParams::from_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(FilterParams::from_json(json)?)
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Apply one algorithm.
    ///
    /// # Errors
    /// Zero-area images and channel counts other than 1, 3 or 4.
    pub fn apply(&self, image: ArrayView3<u8>, algorithm: Algorithm) -> Result<Array3<u8>> {
        self.apply_pipeline(image, &[algorithm])
    }

    /// Apply the algorithm called `name`; unknown names are identity.
    pub fn apply_named(&self, image: ArrayView3<u8>, name: &str) -> Result<Array3<u8>> {
        self.apply(image, Algorithm::from_name(name))
    }

    /// Apply algorithms in order. An empty pipeline returns a copy.
    ///
    /// With [`AlphaPolicy::Preserve`] the alpha channel is split off once,
    /// carried through rotations and flips, and appended to the result.
    pub fn apply_pipeline(&self, image: ArrayView3<u8>, stages: &[Algorithm]) -> Result<Array3<u8>> {
        validate_shape(image.dim())?;

        let (color, alpha) = split_alpha(image);
        let mut alpha = match self.params.alpha {
            AlphaPolicy::Preserve => alpha.map(|a| a.to_owned()),
            AlphaPolicy::Discard => None,
        };

        let mut current = color.to_owned();
        for &stage in stages {
            current = self.run(current.view(), stage);
            if let Some(a) = alpha.as_mut() {
                if stage.is_geometric() {
                    *a = self.run(a.view(), stage);
                }
            }
        }

        match alpha {
            Some(a) => Ok(concatenate(Axis(2), &[current.view(), a.view()])?),
            None => Ok(current),
        }
    }

    fn run(&self, image: ArrayView3<u8>, algorithm: Algorithm) -> Array3<u8> {
        let p = &self.params;
        let (height, width, channels) = image.dim();
        debug!(%algorithm, height, width, channels, "applying filter");

        match algorithm {
            Algorithm::None => image.to_owned(),
            Algorithm::Grayscale => grayscale_u8(image),
            Algorithm::Rotate => match p.rotation {
                RotationDirection::CounterClockwise => rotate_90_ccw_u8(image),
                RotationDirection::Clockwise => rotate_90_cw_u8(image),
                RotationDirection::HalfTurn => rotate_180_u8(image),
            },
            Algorithm::Blur => box_blur_interior_u8(image, p.blur_kernel_size, p.parallel),
            Algorithm::EdgeDetection => {
                edge_detection_u8(image, &p.edge, p.gaussian_truncate, p.parallel)
            }
            Algorithm::Sharpen => unsharp_mask_u8(
                image,
                p.gaussian_sigma,
                p.sharpen_amount,
                p.gaussian_truncate,
                p.parallel,
            ),
            Algorithm::Threshold => threshold_u8(image, p.threshold_cutoff),
            Algorithm::Invert => invert_u8(image),
            Algorithm::FlipVertical => flip_vertical_u8(image),
            Algorithm::GaussianBlur => {
                gaussian_blur_u8(image, p.gaussian_sigma, p.gaussian_truncate, p.parallel)
            }
        }
    }
}

/// Apply `algorithm` with default parameters.
pub fn process_image(image: ArrayView3<u8>, algorithm: &str) -> Result<Array3<u8>> {
    FilterEngine::default().apply_named(image, algorithm)
}
