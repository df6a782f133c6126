//! Real-to-complex FFT backend (realfft)

use std::sync::Arc;

use feature_params::FeatureError;
use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};

use super::{check_frame_lengths, try_alloc, FftBackend};

/// Runs a real-input FFT that only produces the non-negative bins
pub struct RealFftBackend {
    n_fft: usize,
    fft: Arc<dyn RealToComplex<f32>>,
    /// realfft uses the input as scratch, so it is reloaded every frame
    input: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl FftBackend for RealFftBackend {
    const NAME: &'static str = "realfft";

    fn new(n_fft: usize) -> Result<Self, FeatureError> {
        if n_fft == 0 {
            return Err(FeatureError::BackendInit("FFT length must be positive".to_string()));
        }
        let fft = RealFftPlanner::<f32>::new().plan_fft_forward(n_fft);
        let zero = Complex::new(0.0, 0.0);
        let input = try_alloc(n_fft, 0.0)?;
        let spectrum = try_alloc(n_fft / 2 + 1, zero)?;
        let scratch = try_alloc(fft.get_scratch_len(), zero)?;

        Ok(Self {
            n_fft,
            fft,
            input,
            spectrum,
            scratch,
        })
    }

    fn n_fft(&self) -> usize {
        self.n_fft
    }

    fn transform_frame(&mut self, frame: &[f32], power: &mut [f32]) -> Result<(), FeatureError> {
        check_frame_lengths(self.n_fft, frame, power)?;

        let (head, tail) = self.input.split_at_mut(frame.len());
        head.copy_from_slice(frame);
        tail.fill(0.0);

        self.fft
            .process_with_scratch(&mut self.input, &mut self.spectrum, &mut self.scratch)
            .map_err(|e| FeatureError::Internal(format!("realfft: {e}")))?;

        for (p, c) in power.iter_mut().zip(&self.spectrum) {
            *p = c.norm_sqr();
        }
        Ok(())
    }
}
