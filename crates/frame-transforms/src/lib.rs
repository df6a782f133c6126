//! Frame-Level Speech Transforms
//!
//! Slices a signal into overlapping frames and applies the classic
//! per-frame front-end transforms in place.

mod dither;
mod framing;
mod preemphasis;
mod windowing;

pub use dither::{Dither, DITHER_SEED};
pub use framing::{frame_signal, remove_frame_mean, HTK_SAMPLE_SCALE};
pub use preemphasis::PreEmphasis;
pub use windowing::Windowing;
