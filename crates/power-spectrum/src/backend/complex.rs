//! Complex FFT backend (rustfft)

use std::sync::Arc;

use feature_params::FeatureError;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::{check_frame_lengths, try_alloc, FftBackend};

/// Runs a full complex FFT over a real frame loaded with zero imaginary part
pub struct RustFftBackend {
    n_fft: usize,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl FftBackend for RustFftBackend {
    const NAME: &'static str = "rustfft";

    fn new(n_fft: usize) -> Result<Self, FeatureError> {
        if n_fft == 0 {
            return Err(FeatureError::BackendInit("FFT length must be positive".to_string()));
        }
        let fft = FftPlanner::<f32>::new().plan_fft_forward(n_fft);
        let zero = Complex::new(0.0, 0.0);
        let buffer = try_alloc(n_fft, zero)?;
        let scratch = try_alloc(fft.get_inplace_scratch_len(), zero)?;

        Ok(Self {
            n_fft,
            fft,
            buffer,
            scratch,
        })
    }

    fn n_fft(&self) -> usize {
        self.n_fft
    }

    fn transform_frame(&mut self, frame: &[f32], power: &mut [f32]) -> Result<(), FeatureError> {
        check_frame_lengths(self.n_fft, frame, power)?;

        let (head, tail) = self.buffer.split_at_mut(frame.len());
        for (c, &x) in head.iter_mut().zip(frame) {
            *c = Complex::new(x, 0.0);
        }
        tail.fill(Complex::new(0.0, 0.0));

        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        for (p, c) in power.iter_mut().zip(&self.buffer) {
            *p = c.norm_sqr();
        }
        Ok(())
    }
}
