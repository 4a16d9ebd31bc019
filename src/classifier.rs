// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Rule-based gesture classification.
//!
//! Rules form an ordered decision list and the first match wins. Confidences
//! are fixed per rule rather than estimated from the signal.

use crate::features::FeatureVector;
use crate::label::Gesture;

/// Wrist-x movement per frame above which an open palm counts as waving.
///
/// Movement is an `f32`. No `f32` lies strictly between this constant and
/// the decimal 0.04, so comparing in `f32` or `f64` gives the same answer.
pub const WAVE_MOVEMENT_THRESHOLD: f32 = 0.04;

/// Classify one frame's features into a provisional gesture and confidence.
#[must_use]
pub fn classify(features: &FeatureVector) -> (Gesture, f32) {
    let FeatureVector {
        thumb,
        index,
        middle,
        ring,
        pinky,
        movement,
    } = *features;
    let extended = features.extended_count();

    if extended == 5 && movement > WAVE_MOVEMENT_THRESHOLD {
        (Gesture::Bye, 0.95)
    } else if extended == 5 {
        (Gesture::Hello, 0.94)
    } else if index && middle && !ring && !pinky {
        (Gesture::Peace, 0.93)
    } else if thumb && pinky && !index && !middle && !ring {
        (Gesture::CallMe, 0.94)
    } else if thumb && !index && !middle && !ring && !pinky {
        (Gesture::Yes, 0.92)
    } else if extended == 0 {
        (Gesture::No, 0.90)
    } else {
        (Gesture::Unknown, 0.40)
    }
}
