//! Speech Feature Parameters
//!
//! Framing/FFT configuration, its derived sizes, and validation for the
//! power spectrum front end.

mod error;
mod params;
mod validator;

pub use error::FeatureError;
pub use params::{FeatureParams, WindowType, ENV_PREFIX};
pub use validator::validate_power_spectrum_params;
