//! Power Spectrum Feature Engine
//!
//! Turns raw speech waveforms into per-frame power spectra, one utterance
//! at a time or as a parallel batch. The FFT library is chosen at build
//! time with the `rustfft-backend` (default) or `realfft-backend` feature.

mod backend;
mod batch;
mod engine;

pub use backend::{FftBackend, SelectedBackend};
pub use engine::PowerSpectrum;

pub use feature_params::{FeatureError, FeatureParams, WindowType};
