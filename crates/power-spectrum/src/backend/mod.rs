//! FFT Backends
//!
//! Exactly one backend is compiled in, picked by cargo feature. The rest
//! of the crate only sees [`FftBackend`] and the [`SelectedBackend`] alias.

use feature_params::FeatureError;

#[cfg(all(feature = "rustfft-backend", feature = "realfft-backend"))]
compile_error!("features `rustfft-backend` and `realfft-backend` are mutually exclusive");

#[cfg(not(any(feature = "rustfft-backend", feature = "realfft-backend")))]
compile_error!("no FFT backend selected: enable `rustfft-backend` or `realfft-backend`");

#[cfg(feature = "rustfft-backend")]
mod complex;
#[cfg(feature = "realfft-backend")]
mod real;

#[cfg(feature = "rustfft-backend")]
pub use complex::RustFftBackend as SelectedBackend;
#[cfg(feature = "realfft-backend")]
pub use real::RealFftBackend as SelectedBackend;

/// A forward FFT engine that turns one real frame into its power spectrum.
///
/// Implementations own their plan and scratch buffers for their whole
/// lifetime and release them on drop. They are not reentrant; callers
/// serialize access.
pub trait FftBackend: Send + Sized {
    /// Backend name for logging
    const NAME: &'static str;

    /// Plan a transform of length `n_fft` and allocate its buffers
    fn new(n_fft: usize) -> Result<Self, FeatureError>;

    /// Transform length
    fn n_fft(&self) -> usize;

    /// Number of retained bins, `n_fft / 2 + 1`
    fn freq_bins(&self) -> usize {
        self.n_fft() / 2 + 1
    }

    /// Write `|X[k]|^2` for `k in 0..=n_fft/2` into `power`.
    ///
    /// `frame` may be shorter than `n_fft`; it is zero-padded.
    fn transform_frame(&mut self, frame: &[f32], power: &mut [f32]) -> Result<(), FeatureError>;
}

/// Check the frame/output lengths handed to a backend
pub(crate) fn check_frame_lengths(
    n_fft: usize,
    frame: &[f32],
    power: &[f32],
) -> Result<(), FeatureError> {
    if frame.len() > n_fft {
        return Err(FeatureError::InvalidArgument(format!(
            "frame of {} samples exceeds FFT length {}",
            frame.len(),
            n_fft
        )));
    }
    let bins = n_fft / 2 + 1;
    if power.len() != bins {
        return Err(FeatureError::InvalidArgument(format!(
            "power buffer holds {} bins, expected {}",
            power.len(),
            bins
        )));
    }
    Ok(())
}

/// Allocate a filled buffer, reporting allocation failure instead of aborting
pub(crate) fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>, FeatureError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|e| FeatureError::BackendInit(format!("buffer of {len} elements: {e}")))?;
    buf.resize(len, value);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 64;

    #[test]
    fn test_rejects_zero_length() {
        assert!(matches!(
            SelectedBackend::new(0),
            Err(FeatureError::BackendInit(_))
        ));
    }

    #[test]
    fn test_impulse_is_flat() {
        let mut fft = SelectedBackend::new(N).unwrap();
        let mut frame = vec![0.0; N];
        frame[0] = 2.0;
        let mut power = vec![0.0; fft.freq_bins()];
        fft.transform_frame(&frame, &mut power).unwrap();

        assert_eq!(power.len(), N / 2 + 1);
        for &p in &power {
            assert!((p - 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_cosine_lands_on_its_bin() {
        let k = 5;
        let mut fft = SelectedBackend::new(N).unwrap();
        let frame: Vec<f32> = (0..N)
            .map(|i| (2.0 * std::f32::consts::PI * k as f32 * i as f32 / N as f32).cos())
            .collect();
        let mut power = vec![0.0; fft.freq_bins()];
        fft.transform_frame(&frame, &mut power).unwrap();

        // |X[k]| = N / 2 for a unit cosine on bin k
        let expected = (N as f32 / 2.0).powi(2);
        assert!((power[k] - expected).abs() / expected < 1e-4);
        let rest: f32 = power.iter().enumerate().filter(|(i, _)| *i != k).map(|(_, p)| p).sum();
        assert!(rest < 1e-3 * expected);
    }

    #[test]
    fn test_short_frame_is_zero_padded() {
        let mut fft = SelectedBackend::new(N).unwrap();
        let mut padded = vec![0.0; N];
        padded[..3].copy_from_slice(&[1.0, -1.0, 0.5]);

        let mut a = vec![0.0; fft.freq_bins()];
        let mut b = vec![0.0; fft.freq_bins()];
        fft.transform_frame(&[1.0, -1.0, 0.5], &mut a).unwrap();
        fft.transform_frame(&padded, &mut b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_plan_reused_across_frames() {
        let mut fft = SelectedBackend::new(N).unwrap();
        let frame: Vec<f32> = (0..N).map(|i| (i % 7) as f32).collect();
        let mut first = vec![0.0; fft.freq_bins()];
        let mut second = vec![0.0; fft.freq_bins()];
        fft.transform_frame(&frame, &mut first).unwrap();
        fft.transform_frame(&[9.0; N], &mut second).unwrap();
        fft.transform_frame(&frame, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_length_checks() {
        let mut fft = SelectedBackend::new(N).unwrap();
        let mut power = vec![0.0; fft.freq_bins()];
        assert!(matches!(
            fft.transform_frame(&[0.0; N + 1], &mut power),
            Err(FeatureError::InvalidArgument(_))
        ));
        let mut short = vec![0.0; 3];
        assert!(matches!(
            fft.transform_frame(&[0.0; N], &mut short),
            Err(FeatureError::InvalidArgument(_))
        ));
    }
}
