//! Power Spectrum Engine

use std::num::NonZeroUsize;
use std::sync::Mutex;

use feature_params::{validate_power_spectrum_params, FeatureError, FeatureParams};
use frame_transforms::{frame_signal, remove_frame_mean, Dither, PreEmphasis, Windowing};
use tracing::{debug, info};

use crate::backend::{FftBackend, SelectedBackend};

/// Computes power spectrum features for a speech signal.
///
/// Output layout is column-major `FEAT x FRAMES`: the frequency bin
/// varies fastest.
pub struct PowerSpectrum<B: FftBackend = SelectedBackend> {
    params: FeatureParams,
    // Applied in declaration order
    dither: Dither,
    pre_emphasis: PreEmphasis,
    windowing: Windowing,
    /// FFT plan and scratch; not reentrant
    fft: Mutex<B>,
    /// Upper bound on batch worker threads, `None` means one per utterance
    pub(crate) batch_threads: Option<NonZeroUsize>,
}

impl PowerSpectrum {
    /// Create an engine using the compiled-in FFT backend
    pub fn new(params: FeatureParams) -> Result<Self, FeatureError> {
        Self::with_backend(params)
    }
}

impl<B: FftBackend> PowerSpectrum<B> {
    /// Create an engine with an explicit FFT backend
    pub fn with_backend(params: FeatureParams) -> Result<Self, FeatureError> {
        validate_power_spectrum_params(&params)?;

        let frame_size = params.frame_size_samples();
        let dither = Dither::new(params.dither_val);
        let pre_emphasis = PreEmphasis::new(params.preem_coef, frame_size)?;
        let windowing = Windowing::new(frame_size, params.window_type)?;
        let fft = B::new(params.n_fft())?;

        info!(
            "Creating power spectrum engine: backend={}, frame={} samples, stride={} samples, n_fft={}",
            B::NAME,
            frame_size,
            params.frame_stride_samples(),
            params.n_fft()
        );

        Ok(Self {
            params,
            dither,
            pre_emphasis,
            windowing,
            fft: Mutex::new(fft),
            batch_threads: None,
        })
    }

    /// Cap the number of worker threads used by `batch_apply`
    pub fn with_batch_threads(mut self, threads: NonZeroUsize) -> Self {
        self.batch_threads = Some(threads);
        self
    }

    /// Feature parameters this engine was built with
    pub fn feature_params(&self) -> &FeatureParams {
        &self.params
    }

    /// Number of output values for an input of `input_len` samples
    pub fn output_size(&self, input_len: usize) -> usize {
        self.params.pow_spec_feat_size() * self.params.num_frames(input_len)
    }

    /// Power spectrum of `signal`; empty if it is shorter than one frame
    pub fn apply(&self, signal: &[f32]) -> Result<Vec<f32>, FeatureError> {
        let frames = frame_signal(signal, &self.params);
        if frames.is_empty() {
            return Ok(Vec::new());
        }
        self.apply_frames(frames)
    }

    /// Power spectrum of an already framed buffer of
    /// `num_frames * frame_size_samples` values
    pub fn apply_frames(&self, mut frames: Vec<f32>) -> Result<Vec<f32>, FeatureError> {
        let frame_size = self.params.frame_size_samples();
        if frames.len() % frame_size != 0 {
            return Err(FeatureError::InvalidArgument(format!(
                "frame buffer of {} samples is not a multiple of the frame size {}",
                frames.len(),
                frame_size
            )));
        }
        let num_frames = frames.len() / frame_size;
        if num_frames == 0 {
            return Ok(Vec::new());
        }
        debug!("Computing power spectrum for {} frames", num_frames);

        self.dither.apply_in_place(&mut frames)?;
        if self.params.zero_mean_frame {
            remove_frame_mean(&mut frames, frame_size);
        }
        if self.params.preem_coef != 0.0 {
            self.pre_emphasis.apply_in_place(&mut frames)?;
        }
        self.windowing.apply_in_place(&mut frames)?;

        let bins = self.params.freq_bins();
        let mut dft = vec![0.0; bins * num_frames];

        let mut fft = self
            .fft
            .lock()
            .map_err(|_| FeatureError::Internal("FFT scratch lock poisoned".to_string()))?;
        for (frame, power) in frames.chunks_exact(frame_size).zip(dft.chunks_exact_mut(bins)) {
            fft.transform_frame(frame, power)?;
        }
        Ok(dft)
    }
}
