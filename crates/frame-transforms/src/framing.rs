//! Signal Framing

use feature_params::FeatureParams;

/// Samples are scaled from [-1, 1] to the 16-bit integer range, which is
/// what HTK-compatible front ends expect.
pub const HTK_SAMPLE_SCALE: f32 = 32768.0;

/// Slice `signal` into overlapping frames of `frame_size_samples`, one
/// frame every `frame_stride_samples`.
///
/// Returns a flat buffer of `num_frames * frame_size_samples` values;
/// empty when the signal is shorter than one frame.
pub fn frame_signal(signal: &[f32], params: &FeatureParams) -> Vec<f32> {
    let frame_size = params.frame_size_samples();
    let frame_stride = params.frame_stride_samples();
    let num_frames = params.num_frames(signal.len());

    let mut frames = Vec::with_capacity(num_frames * frame_size);
    for f in 0..num_frames {
        let start = f * frame_stride;
        frames.extend(
            signal[start..start + frame_size]
                .iter()
                .map(|&x| x * HTK_SAMPLE_SCALE),
        );
    }
    frames
}

/// Subtract each frame's own mean from its samples
pub fn remove_frame_mean(frames: &mut [f32], frame_len: usize) {
    if frame_len == 0 {
        return;
    }
    for frame in frames.chunks_exact_mut(frame_len) {
        let mean = (frame.iter().map(|&x| x as f64).sum::<f64>() / frame_len as f64) as f32;
        frame.iter_mut().for_each(|x| *x -= mean);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn small_params() -> FeatureParams {
        // 4-sample frames, 2-sample stride
        FeatureParams {
            sampling_freq: 1000,
            frame_size_ms: 4.0,
            frame_stride_ms: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_overlapping_frames() {
        let signal: Vec<f32> = (0..8).map(|i| i as f32 / HTK_SAMPLE_SCALE).collect();
        let frames = frame_signal(&signal, &small_params());

        // floor((8 - 4) / 2) + 1 = 3 frames
        assert_eq!(frames.len(), 12);
        assert_eq!(&frames[0..4], &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(&frames[4..8], &[2.0, 3.0, 4.0, 5.0]);
        assert_eq!(&frames[8..12], &[4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_short_signal_yields_no_frames() {
        assert!(frame_signal(&[0.5; 3], &small_params()).is_empty());
        assert!(frame_signal(&[], &small_params()).is_empty());
    }

    #[test]
    fn test_remove_frame_mean_per_frame() {
        let mut frames = vec![1.0, 2.0, 3.0, 10.0, 10.0, 10.0];
        remove_frame_mean(&mut frames, 3);
        // Second frame's mean must not leak into the first
        assert_eq!(frames, vec![-1.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
    }

    proptest! {
        #[test]
        fn prop_frame_buffer_length(len in 0usize..200) {
            let params = small_params();
            let frames = frame_signal(&vec![0.1; len], &params);
            prop_assert_eq!(frames.len(), params.num_frames(len) * params.frame_size_samples());
        }
    }
}
