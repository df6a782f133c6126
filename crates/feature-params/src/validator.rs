//! Parameter Validation for the Power Spectrum Front End

use crate::error::FeatureError;
use crate::params::FeatureParams;

/// Reject a value that is not strictly positive
fn require_positive(field: &'static str, value: f64, reason: &str) -> Result<(), FeatureError> {
    // NaN fails this comparison as well
    if value > 0.0 {
        Ok(())
    } else {
        Err(FeatureError::InvalidParameter(format!(
            "{field} {reason} (got {value})"
        )))
    }
}

/// Check that the framing/FFT configuration is physically sane.
///
/// Runs before any buffer is sized from `params`.
pub fn validate_power_spectrum_params(params: &FeatureParams) -> Result<(), FeatureError> {
    require_positive("sampling_freq", params.sampling_freq as f64, "must be positive")?;
    require_positive("frame_size_ms", params.frame_size_ms, "must be positive")?;
    require_positive("frame_stride_ms", params.frame_stride_ms, "must be positive")?;
    require_positive(
        "frame_size_ms",
        params.frame_size_samples() as f64,
        "is too low to hold a single sample",
    )?;
    require_positive(
        "frame_stride_ms",
        params.frame_stride_samples() as f64,
        "is too low to advance a single sample",
    )?;

    if let Some(n_fft) = params.fft_size {
        let frame_size = params.frame_size_samples();
        if n_fft < frame_size {
            return Err(FeatureError::InvalidParameter(format!(
                "fft_size {n_fft} is smaller than the frame size of {frame_size} samples"
            )));
        }
    }

    Ok(())
}
