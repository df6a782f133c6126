//! Batched Power Spectrum

use feature_params::FeatureError;
use rayon::prelude::*;
use tracing::{debug, error};

use crate::backend::FftBackend;
use crate::engine::PowerSpectrum;

impl<B: FftBackend> PowerSpectrum<B> {
    /// Power spectrum of `batch_size` equal-length utterances concatenated
    /// in `input` (column-major `T x BATCH`).
    ///
    /// Returns column-major `FEAT x FRAMES x BATCH`. Fails without a partial
    /// result if any utterance fails.
    pub fn batch_apply(&self, input: &[f32], batch_size: usize) -> Result<Vec<f32>, FeatureError> {
        if batch_size == 0 {
            return Err(FeatureError::InvalidArgument(
                "batch size must be positive".to_string(),
            ));
        }
        if input.len() % batch_size != 0 {
            return Err(FeatureError::InvalidArgument(format!(
                "input of {} samples is not divisible by batch size {}",
                input.len(),
                batch_size
            )));
        }

        let utterance_len = input.len() / batch_size;
        let output_size = self.output_size(utterance_len);
        if output_size == 0 {
            debug!("Batch of {} utterances is shorter than one frame", batch_size);
            return Ok(Vec::new());
        }

        let workers = match self.batch_threads {
            Some(cap) => batch_size.min(cap.get()),
            None => batch_size,
        };
        debug!(
            "Batch power spectrum: {} utterances of {} samples on {} workers",
            batch_size, utterance_len, workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| FeatureError::Internal(format!("worker pool: {e}")))?;

        // All workers share this engine: framing and the transform chain run
        // in parallel, but FFT calls serialize on the engine's scratch lock.
        // Give each worker its own engine to parallelize the FFT as well.
        let mut features = vec![0.0; output_size * batch_size];
        pool.install(|| {
            features
                .par_chunks_mut(output_size)
                .zip(input.par_chunks(utterance_len))
                .try_for_each(|(out, utterance)| {
                    let feat = self.apply(utterance)?;
                    if feat.len() != out.len() {
                        let msg = format!(
                            "apply() returned {} values, expected {}",
                            feat.len(),
                            out.len()
                        );
                        error!("{}", msg);
                        return Err(FeatureError::Internal(msg));
                    }
                    out.copy_from_slice(&feat);
                    Ok(())
                })
        })?;

        Ok(features)
    }
}
