// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Hand landmark types.
//!
//! Keypoints follow the 21-point hand topology used by common hand-landmark
//! networks: the wrist, then four joints per finger from thumb to pinky.

use crate::error::{InferenceError, Result};

/// Number of keypoints in a hand landmark set.
pub const HAND_LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// A single keypoint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    /// X coordinate, normalized to image width (0.0 left, 1.0 right).
    pub x: f32,
    /// Y coordinate, normalized to image height (0.0 top, 1.0 bottom).
    pub y: f32,
    /// Relative depth. Not used for classification.
    pub z: f32,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// The 21 keypoints of one detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkSet {
    points: [Landmark; HAND_LANDMARK_COUNT],
}

impl LandmarkSet {
    /// Wrap exactly 21 keypoints.
    #[must_use]
    pub const fn new(points: [Landmark; HAND_LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build a landmark set from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::PostProcessingError`] if the slice does not
    /// hold exactly 21 keypoints.
    pub fn from_slice(points: &[Landmark]) -> Result<Self> {
        let points: [Landmark; HAND_LANDMARK_COUNT] = points.try_into().map_err(|_| {
            InferenceError::PostProcessingError(format!(
                "expected {HAND_LANDMARK_COUNT} landmarks, got {}",
                points.len()
            ))
        })?;
        Ok(Self { points })
    }

    /// Keypoint by index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 21`.
    #[must_use]
    pub const fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    /// The wrist keypoint.
    #[must_use]
    pub const fn wrist(&self) -> Landmark {
        self.points[WRIST]
    }

    /// All keypoints in index order.
    #[must_use]
    pub const fn points(&self) -> &[Landmark; HAND_LANDMARK_COUNT] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_requires_21_points() {
        let points = vec![Landmark::default(); 20];
        assert!(LandmarkSet::from_slice(&points).is_err());

        let mut points = vec![Landmark::default(); 21];
        points[WRIST] = Landmark::new(0.25, 0.75, 0.0);
        let set = LandmarkSet::from_slice(&points).unwrap();
        assert!((set.wrist().x - 0.25).abs() < f32::EPSILON);
        assert!((set.get(WRIST).y - 0.75).abs() < f32::EPSILON);
    }
}
