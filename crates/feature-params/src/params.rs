//! Speech Feature Parameters

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Prefix for environment overrides, e.g. `SPEECH_FEATURES_DITHER_VAL`
pub const ENV_PREFIX: &str = "SPEECH_FEATURES";

/// Window function applied to every frame before the FFT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// 0.54 - 0.46 cos(2 pi n / (N - 1))
    Hamming,
    /// 0.5 (1 - cos(2 pi n / (N - 1)))
    Hanning,
    /// All ones
    Rectangular,
}

impl WindowType {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowType::Hamming => "hamming",
            WindowType::Hanning => "hanning",
            WindowType::Rectangular => "rectangular",
        }
    }
}

/// Signal framing and front-end configuration
///
/// Read-only once handed to an engine. The derived sample counts are
/// only meaningful after [`crate::validate_power_spectrum_params`] passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureParams {
    /// Sampling frequency (Hz)
    pub sampling_freq: i64,
    /// Frame length (ms)
    pub frame_size_ms: f64,
    /// Frame shift (ms)
    pub frame_stride_ms: f64,
    /// Dither scale, 0 disables dithering
    pub dither_val: f32,
    /// Pre-emphasis coefficient, 0 disables pre-emphasis
    pub preem_coef: f32,
    /// Window function
    pub window_type: WindowType,
    /// Subtract the per-frame mean before pre-emphasis
    pub zero_mean_frame: bool,
    /// Explicit FFT length; derived from the frame size when `None`
    pub fft_size: Option<usize>,
}

impl Default for FeatureParams {
    fn default() -> Self {
        Self {
            sampling_freq: 16000,
            frame_size_ms: 25.0,
            frame_stride_ms: 10.0,
            dither_val: 0.0,
            preem_coef: 0.97,
            window_type: WindowType::Hamming,
            zero_mean_frame: true,
            fft_size: None,
        }
    }
}

impl FeatureParams {
    /// HTK-style front end (the default configuration)
    pub fn htk() -> Self {
        Self::default()
    }

    /// Plain power spectrum: no dither, no mean removal, no pre-emphasis,
    /// rectangular window
    pub fn raw() -> Self {
        Self {
            preem_coef: 0.0,
            window_type: WindowType::Rectangular,
            zero_mean_frame: false,
            ..Default::default()
        }
    }

    /// Load parameters from a config file, overridden by `SPEECH_FEATURES_*`
    /// environment variables. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeatureError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Parse parameters from a TOML document
    pub fn from_toml(source: &str) -> Result<Self, FeatureError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Samples per frame, 0 if the configuration is degenerate
    pub fn frame_size_samples(&self) -> usize {
        ms_to_samples(self.frame_size_ms, self.sampling_freq)
    }

    /// Samples between consecutive frame starts, 0 if degenerate
    pub fn frame_stride_samples(&self) -> usize {
        ms_to_samples(self.frame_stride_ms, self.sampling_freq)
    }

    /// FFT length
    pub fn n_fft(&self) -> usize {
        if let Some(n) = self.fft_size {
            return n;
        }
        match self.frame_size_samples() {
            0 => 0,
            n => n.next_power_of_two(),
        }
    }

    /// Number of retained frequency bins per frame
    pub fn freq_bins(&self) -> usize {
        (self.n_fft() >> 1) + 1
    }

    /// Feature dimension of the power spectrum
    pub fn pow_spec_feat_size(&self) -> usize {
        self.freq_bins()
    }

    /// Number of frames produced for an input of `input_len` samples
    pub fn num_frames(&self, input_len: usize) -> usize {
        let frame_size = self.frame_size_samples();
        let frame_stride = self.frame_stride_samples();
        if frame_stride == 0 || frame_size == 0 || input_len < frame_size {
            return 0;
        }
        1 + (input_len - frame_size) / frame_stride
    }
}

// Negative and NaN products saturate to 0
fn ms_to_samples(ms: f64, sampling_freq: i64) -> usize {
    (1e-3 * ms * sampling_freq as f64).round() as usize
}
