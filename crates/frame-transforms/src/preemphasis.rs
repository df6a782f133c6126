//! First-Order Pre-Emphasis Filter

use feature_params::FeatureError;

/// High-pass difference filter `y[i] = x[i] - coef * x[i - 1]`, applied
/// independently to each frame. The first sample of a frame becomes
/// `(1 - coef) * x[0]`.
#[derive(Debug, Clone)]
pub struct PreEmphasis {
    coef: f32,
    window_len: usize,
}

impl PreEmphasis {
    /// Create a filter for frames of `window_len` samples
    pub fn new(coef: f32, window_len: usize) -> Result<Self, FeatureError> {
        if window_len <= 1 {
            return Err(FeatureError::InvalidParameter(format!(
                "pre-emphasis window length must be > 1 (got {window_len})"
            )));
        }
        if !(0.0..1.0).contains(&coef) {
            return Err(FeatureError::InvalidParameter(format!(
                "pre-emphasis coefficient must be in [0, 1) (got {coef})"
            )));
        }
        Ok(Self { coef, window_len })
    }

    /// Filter coefficient
    pub fn coef(&self) -> f32 {
        self.coef
    }

    /// Return a filtered copy of `input`
    pub fn apply(&self, input: &[f32]) -> Result<Vec<f32>, FeatureError> {
        let mut output = input.to_vec();
        self.apply_in_place(&mut output)?;
        Ok(output)
    }

    /// Filter every frame of `input` in place
    pub fn apply_in_place(&self, input: &mut [f32]) -> Result<(), FeatureError> {
        if input.len() % self.window_len != 0 {
            return Err(FeatureError::InvalidArgument(format!(
                "pre-emphasis input of {} samples is not a multiple of the window length {}",
                input.len(),
                self.window_len
            )));
        }
        for frame in input.chunks_exact_mut(self.window_len) {
            // Walk backwards so x[i - 1] is still the unfiltered sample
            for i in (1..frame.len()).rev() {
                frame[i] -= self.coef * frame[i - 1];
            }
            frame[0] *= 1.0 - self.coef;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        let preem = PreEmphasis::new(0.5, 4).unwrap();
        let out = preem.apply(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_eq!(out, vec![1.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_frames_filtered_independently() {
        let preem = PreEmphasis::new(0.5, 2).unwrap();
        let out = preem.apply(&[2.0, 2.0, 4.0, 4.0]).unwrap();
        // Second frame's first sample does not see the first frame
        assert_eq!(out, vec![1.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_zero_coef_is_identity() {
        let preem = PreEmphasis::new(0.0, 3).unwrap();
        let input = vec![5.0; 6];
        assert_eq!(preem.apply(&input).unwrap(), input);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(PreEmphasis::new(0.97, 1), Err(FeatureError::InvalidParameter(_))));
        assert!(matches!(PreEmphasis::new(1.0, 400), Err(FeatureError::InvalidParameter(_))));
        assert!(matches!(PreEmphasis::new(-0.1, 400), Err(FeatureError::InvalidParameter(_))));
    }

    #[test]
    fn test_length_mismatch() {
        let preem = PreEmphasis::new(0.97, 4).unwrap();
        let mut input = vec![0.0; 6];
        assert!(matches!(
            preem.apply_in_place(&mut input),
            Err(FeatureError::InvalidArgument(_))
        ));
    }
}
