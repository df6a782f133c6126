//! Additive Gaussian Dither

use std::sync::Mutex;

use feature_params::FeatureError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Seed used for positive dither values so features are reproducible
pub const DITHER_SEED: u64 = 123456;

/// Adds `dither_val * N(0, 1)` to every sample.
///
/// A positive `dither_val` seeds the generator with [`DITHER_SEED`]; a
/// negative one draws its seed from the OS and scales by `|dither_val|`.
pub struct Dither {
    dither_val: f32,
    /// Random number generator (Mutex for thread safety)
    rng: Mutex<StdRng>,
}

impl Dither {
    /// Create a new dither stage
    pub fn new(dither_val: f32) -> Self {
        let rng = if dither_val > 0.0 {
            StdRng::seed_from_u64(DITHER_SEED)
        } else {
            StdRng::from_entropy()
        };
        Self {
            dither_val,
            rng: Mutex::new(rng),
        }
    }

    /// Create a dither stage with an explicit seed
    pub fn with_seed(dither_val: f32, seed: u64) -> Self {
        Self {
            dither_val,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Dither scale
    pub fn dither_val(&self) -> f32 {
        self.dither_val
    }

    /// Return a dithered copy of `input`
    pub fn apply(&self, input: &[f32]) -> Result<Vec<f32>, FeatureError> {
        let mut output = input.to_vec();
        self.apply_in_place(&mut output)?;
        Ok(output)
    }

    /// Dither `input` in place; a no-op when the scale is zero
    pub fn apply_in_place(&self, input: &mut [f32]) -> Result<(), FeatureError> {
        if self.dither_val == 0.0 {
            return Ok(());
        }
        let scale = self.dither_val.abs();
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| FeatureError::Internal("dither RNG lock poisoned".to_string()))?;

        debug!("Dithering {} samples (scale={})", input.len(), scale);

        // Box-Muller transform
        for x in input.iter_mut() {
            let u1: f32 = rng.gen_range(0.0001_f32..1.0_f32);
            let u2: f32 = rng.gen_range(0.0_f32..1.0_f32);
            let z = (-2.0_f32 * u1.ln()).sqrt() * (2.0_f32 * std::f32::consts::PI * u2).cos();
            *x += scale * z;
        }
        Ok(())
    }
}
