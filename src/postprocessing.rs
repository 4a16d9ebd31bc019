// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Post-processing for hand-landmark model outputs.
//!
//! The network emits a flat 63-value keypoint tensor (x, y, z for each of the
//! 21 landmarks, in input-tensor pixels) and a single hand-presence logit.
//! Outputs are matched by element count, first match in session order wins,
//! so a trailing world-landmark tensor of the same size is ignored.

use crate::error::{InferenceError, Result};
use crate::landmarks::{HAND_LANDMARK_COUNT, Landmark, LandmarkSet};
use crate::preprocessing::PreprocessResult;

/// Values per keypoint in the landmark tensor.
const VALUES_PER_LANDMARK: usize = 3;

/// Logistic function used on the presence logit.
#[must_use]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Hand-presence probability from raw model outputs.
///
/// # Errors
///
/// Returns [`InferenceError::PostProcessingError`] if no single-value output exists.
pub fn presence_score(outputs: &[(Vec<f32>, Vec<usize>)]) -> Result<f32> {
    outputs
        .iter()
        .find(|(data, _)| data.len() == 1)
        .map(|(data, _)| sigmoid(data[0]))
        .ok_or_else(|| {
            InferenceError::PostProcessingError("model has no hand-presence output".to_string())
        })
}

/// Decode raw model outputs into a landmark set.
///
/// # Arguments
///
/// * `outputs` - Raw model outputs (data, shape) in session order.
/// * `preprocess` - Letterbox transform of the frame that produced the outputs.
/// * `threshold` - Minimum presence probability to report a hand.
///
/// # Returns
///
/// `None` when the presence probability is below `threshold`.
///
/// # Errors
///
/// Returns [`InferenceError::PostProcessingError`] if the expected outputs are missing.
pub fn postprocess(
    outputs: &[(Vec<f32>, Vec<usize>)],
    preprocess: &PreprocessResult,
    threshold: f32,
) -> Result<Option<LandmarkSet>> {
    let score = presence_score(outputs)?;
    if score < threshold {
        return Ok(None);
    }

    let expected = HAND_LANDMARK_COUNT * VALUES_PER_LANDMARK;
    let (data, _shape) = outputs
        .iter()
        .find(|(data, _)| data.len() == expected)
        .ok_or_else(|| {
            InferenceError::PostProcessingError(format!(
                "model has no {expected}-value landmark output"
            ))
        })?;

    #[allow(clippy::cast_precision_loss)]
    let input_width = preprocess.tensor.shape()[2] as f32;

    let points: Vec<Landmark> = data
        .chunks_exact(VALUES_PER_LANDMARK)
        .map(|v| {
            let (x, y) = preprocess.to_normalized(v[0], v[1]);
            Landmark::new(x, y, v[2] / input_width)
        })
        .collect();

    LandmarkSet::from_slice(&points).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array4;

    fn identity_transform() -> PreprocessResult {
        PreprocessResult {
            tensor: Array4::zeros((1, 224, 224, 3)),
            orig_shape: (224, 224),
            scale: (1.0, 1.0),
            padding: (0.0, 0.0),
        }
    }

    fn landmark_output() -> (Vec<f32>, Vec<usize>) {
        let data: Vec<f32> = (0..HAND_LANDMARK_COUNT)
            .flat_map(|i| [i as f32 * 10.0, 112.0, 0.0])
            .collect();
        (data, vec![1, 63])
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-6);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn test_low_presence_is_no_hand() {
        let outputs = vec![landmark_output(), (vec![-5.0], vec![1, 1])];
        let result = postprocess(&outputs, &identity_transform(), 0.6).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_decodes_normalized_landmarks() {
        let outputs = vec![landmark_output(), (vec![5.0], vec![1, 1])];
        let set = postprocess(&outputs, &identity_transform(), 0.6).unwrap().unwrap();

        assert!((set.get(0).y - 0.5).abs() < 1e-6);
        assert!((set.get(2).x - 20.0 / 224.0).abs() < 1e-6);
    }

    #[test]
    fn test_missing_outputs_are_errors() {
        let outputs = vec![landmark_output()];
        assert!(postprocess(&outputs, &identity_transform(), 0.6).is_err());

        let outputs = vec![(vec![5.0], vec![1, 1])];
        assert!(postprocess(&outputs, &identity_transform(), 0.6).is_err());
    }
}
