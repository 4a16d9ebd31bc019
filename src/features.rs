// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Geometric features derived from one hand.
//!
//! The thumb is tested on x (it extends sideways in a front-facing pose),
//! the other four fingers on y (tip above the middle joint). Image y grows
//! downwards, so "above" means numerically smaller.

use crate::landmarks::{
    INDEX_PIP, INDEX_TIP, LandmarkSet, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_TIP,
};

/// Per-frame features consumed by the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeatureVector {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
    /// Absolute wrist-x change since the previous frame, 0.0 on the first frame.
    pub movement: f32,
}

impl FeatureVector {
    /// Features from explicit finger states and movement.
    #[must_use]
    pub const fn new(fingers: [bool; 5], movement: f32) -> Self {
        let [thumb, index, middle, ring, pinky] = fingers;
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
            movement,
        }
    }

    /// Finger states ordered thumb to pinky.
    #[must_use]
    pub const fn fingers(&self) -> [bool; 5] {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
    }

    /// Number of extended fingers (0 to 5).
    #[must_use]
    pub fn extended_count(&self) -> usize {
        self.fingers().iter().filter(|&&up| up).count()
    }
}

/// Derive features from a landmark set.
///
/// # Arguments
///
/// * `landmarks` - The detected hand.
/// * `previous_wrist_x` - Wrist x from the previous hand-bearing frame, if any.
#[must_use]
pub fn derive_features(landmarks: &LandmarkSet, previous_wrist_x: Option<f32>) -> FeatureVector {
    let tip_above = |tip: usize, pip: usize| landmarks.get(tip).y < landmarks.get(pip).y;

    let thumb = landmarks.get(THUMB_TIP).x < landmarks.get(THUMB_IP).x;
    let index = tip_above(INDEX_TIP, INDEX_PIP);
    let middle = tip_above(MIDDLE_TIP, MIDDLE_PIP);
    let ring = tip_above(RING_TIP, RING_PIP);
    let pinky = tip_above(PINKY_TIP, PINKY_PIP);

    let movement = previous_wrist_x.map_or(0.0, |prev| (landmarks.wrist().x - prev).abs());

    FeatureVector {
        thumb,
        index,
        middle,
        ring,
        pinky,
        movement,
    }
}
