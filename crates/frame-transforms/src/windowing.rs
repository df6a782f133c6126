//! Frame Windowing

use feature_params::{FeatureError, WindowType};
use tracing::info;

/// Multiplies every frame by a precomputed window
#[derive(Debug, Clone)]
pub struct Windowing {
    window_type: WindowType,
    coefs: Vec<f32>,
}

impl Windowing {
    /// Create a window of `window_len` coefficients
    pub fn new(window_len: usize, window_type: WindowType) -> Result<Self, FeatureError> {
        if window_len <= 1 {
            return Err(FeatureError::InvalidParameter(format!(
                "window length must be > 1 (got {window_len})"
            )));
        }

        let denom = (window_len - 1) as f64;
        let coefs = (0..window_len)
            .map(|n| {
                let phase = 2.0 * std::f64::consts::PI * n as f64 / denom;
                let c = match window_type {
                    WindowType::Hamming => 0.54 - 0.46 * phase.cos(),
                    WindowType::Hanning => 0.5 * (1.0 - phase.cos()),
                    WindowType::Rectangular => 1.0,
                };
                c as f32
            })
            .collect();

        info!("Created {} window of length {}", window_type.as_str(), window_len);
        Ok(Self { window_type, coefs })
    }

    /// Window function in use
    pub fn window_type(&self) -> WindowType {
        self.window_type
    }

    /// Window coefficients
    pub fn coefs(&self) -> &[f32] {
        &self.coefs
    }

    /// Return a windowed copy of `input`
    pub fn apply(&self, input: &[f32]) -> Result<Vec<f32>, FeatureError> {
        let mut output = input.to_vec();
        self.apply_in_place(&mut output)?;
        Ok(output)
    }

    /// Window every frame of `input` in place
    pub fn apply_in_place(&self, input: &mut [f32]) -> Result<(), FeatureError> {
        let n = self.coefs.len();
        if input.len() % n != 0 {
            return Err(FeatureError::InvalidArgument(format!(
                "windowing input of {} samples is not a multiple of the window length {}",
                input.len(),
                n
            )));
        }
        for frame in input.chunks_exact_mut(n) {
            for (x, &c) in frame.iter_mut().zip(&self.coefs) {
                *x *= c;
            }
        }
        Ok(())
    }
}
