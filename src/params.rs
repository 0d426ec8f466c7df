//! Versioned parameter set for the filter engine.

use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};
use crate::filters::core::MAX_KERNEL_RADIUS;
use crate::filters::edge::EdgeParams;

/// Current layout of [`FilterParams`].
pub const PARAMS_VERSION: u32 = 1;

/// Largest accepted `blur_kernel_size`.
pub const MAX_BLUR_KERNEL: usize = 255;

/// Turn applied by `rotate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    /// 90° counter-clockwise; height and width swap.
    #[default]
    CounterClockwise,
    /// 90° clockwise; height and width swap.
    Clockwise,
    /// 180°; shape unchanged.
    HalfTurn,
}

/// What happens to the alpha channel of a 4-channel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaPolicy {
    /// Drop alpha on ingestion; outputs have 1 or 3 channels.
    #[default]
    Discard,
    /// Filter the color channels and re-attach alpha, following geometric
    /// filters; outputs have 2 or 4 channels.
    Preserve,
}

/// Engine configuration.
///
/// Missing fields deserialize to their defaults, which reproduce the plain
/// behavior of the translator front ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    /// Layout version, must equal [`PARAMS_VERSION`].
    pub version: u32,
    /// Edge length of the box blur kernel (odd).
    pub blur_kernel_size: usize,
    /// Sigma of the Gaussian used by `sharpen` and `gaussian_blur`.
    pub gaussian_sigma: f32,
    /// Gaussian kernel extent in standard deviations.
    pub gaussian_truncate: f32,
    /// Weight of the detail added back by `sharpen`.
    pub sharpen_amount: f32,
    /// `threshold` maps luminance strictly above this to 255.
    pub threshold_cutoff: u8,
    pub edge: EdgeParams,
    pub rotation: RotationDirection,
    pub alpha: AlphaPolicy,
    /// Fill rows of neighborhood filters on the rayon pool.
    pub parallel: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            version: PARAMS_VERSION,
            blur_kernel_size: 5,
            gaussian_sigma: 1.0,
            gaussian_truncate: 4.0,
            sharpen_amount: 1.0,
            threshold_cutoff: 128,
            edge: EdgeParams::default(),
            rotation: RotationDirection::default(),
            alpha: AlphaPolicy::default(),
            parallel: true,
        }
    }
}

impl FilterParams {
    /// Defaults with the pre-smoothed, contrast-boosted edge detector.
    pub fn strict_edges() -> Self {
        Self {
            edge: EdgeParams::strict(),
            ..Self::default()
        }
    }

    /// Parse a JSON parameter set and validate it.
    ///
    /// Missing fields take their defaults, so `"{}"` is the default set.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Check the parameter set before an engine is built from it.
    pub fn validate(&self) -> Result<()> {
        if self.version != PARAMS_VERSION {
            return Err(FilterError::UnsupportedParamsVersion(self.version));
        }
        if self.blur_kernel_size == 0
            || self.blur_kernel_size % 2 == 0
            || self.blur_kernel_size > MAX_BLUR_KERNEL
        {
            return Err(FilterError::InvalidParams(format!(
                "blur_kernel_size must be odd and in 1..={MAX_BLUR_KERNEL}, got {}",
                self.blur_kernel_size
            )));
        }
        non_negative("gaussian_sigma", self.gaussian_sigma)?;
        non_negative("sharpen_amount", self.sharpen_amount)?;
        non_negative("edge.presmooth_sigma", self.edge.presmooth_sigma)?;
        non_negative("edge.mean_cutoff", self.edge.mean_cutoff)?;
        positive("gaussian_truncate", self.gaussian_truncate)?;
        positive("edge.contrast", self.edge.contrast)?;
        if let Some(threshold) = self.edge.binary_threshold {
            non_negative("edge.binary_threshold", threshold)?;
        }
        kernel_radius("gaussian_sigma", self.gaussian_sigma, self.gaussian_truncate)?;
        kernel_radius("edge.presmooth_sigma", self.edge.presmooth_sigma, self.gaussian_truncate)?;
        Ok(())
    }
}

fn kernel_radius(name: &str, sigma: f32, truncate: f32) -> Result<()> {
    let radius = sigma * truncate;
    if radius <= MAX_KERNEL_RADIUS as f32 {
        Ok(())
    } else {
        Err(FilterError::InvalidParams(format!(
            "{name} * gaussian_truncate must be <= {MAX_KERNEL_RADIUS}, got {radius}"
        )))
    }
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(FilterError::InvalidParams(format!(
            "{name} must be finite and >= 0, got {value}"
        )))
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FilterError::InvalidParams(format!(
            "{name} must be finite and > 0, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(FilterParams::default().validate().is_ok());
        assert!(FilterParams::strict_edges().validate().is_ok());
    }

    #[test]
    fn test_rejects_even_kernel() {
        let params = FilterParams {
            blur_kernel_size: 4,
            ..FilterParams::default()
        };
        assert!(matches!(params.validate(), Err(FilterError::InvalidParams(_))));
    }

    #[test]
    fn test_rejects_negative_sigma_and_nan_contrast() {
        let params = FilterParams {
            gaussian_sigma: -1.0,
            ..FilterParams::default()
        };
        assert!(params.validate().is_err());

        let mut params = FilterParams::default();
        params.edge.contrast = f32::NAN;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_kernels_from_json() {
        let err = FilterParams::from_json(r#"{"gaussian_sigma": 1e30}"#).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParams(_)));

        let err = FilterParams::from_json(r#"{"blur_kernel_size": 18446744073709551615}"#).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParams(_)));

        let err = FilterParams::from_json(r#"{"blur_kernel_size": 257}"#).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParams(_)));

        let err = FilterParams::from_json(r#"{"edge": {"presmooth_sigma": 300.0}}"#).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParams(_)));

        // Radius exactly at the limit is accepted
        assert!(FilterParams::from_json(r#"{"gaussian_sigma": 256.0}"#).is_ok());
        assert!(FilterParams::from_json(r#"{"blur_kernel_size": 255}"#).is_ok());
    }

    #[test]
    fn test_from_json_reports_malformed_input() {
        assert!(matches!(
            FilterParams::from_json("{not json"),
            Err(FilterError::ParamsJson(_))
        ));
        assert_eq!(FilterParams::from_json("{}").unwrap(), FilterParams::default());
    }

    #[test]
    fn test_binary_threshold_and_half_turn_from_json() {
        let params =
            FilterParams::from_json(r#"{"rotation": "half_turn", "edge": {"binary_threshold": 100}}"#)
                .unwrap();
        assert_eq!(params.rotation, RotationDirection::HalfTurn);
        assert_eq!(params.edge.binary_threshold, Some(100.0));

        let err = FilterParams::from_json(r#"{"edge": {"binary_threshold": -1}}"#).unwrap_err();
        assert!(matches!(err, FilterError::InvalidParams(_)));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let params = FilterParams {
            version: 7,
            ..FilterParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(FilterError::UnsupportedParamsVersion(7))
        ));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let params: FilterParams =
            serde_json::from_str(r#"{"blur_kernel_size": 3, "edge": {"contrast": 1.5}, "alpha": "preserve"}"#)
                .unwrap();
        assert_eq!(params.blur_kernel_size, 3);
        assert_eq!(params.edge.contrast, 1.5);
        assert_eq!(params.edge.presmooth_sigma, 0.0);
        assert_eq!(params.alpha, AlphaPolicy::Preserve);
        assert_eq!(params.version, PARAMS_VERSION);
        assert_eq!(params.threshold_cutoff, 128);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let params = FilterParams {
            rotation: RotationDirection::Clockwise,
            parallel: false,
            ..FilterParams::strict_edges()
        };
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"clockwise\""));
        let back: FilterParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
