// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Classification results.

use std::fmt;

use serde::Serialize;

use crate::label::{Gesture, Label, Sentinel};

/// Label and confidence returned for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    /// Smoothed gesture label, or a sentinel.
    pub label: Label,
    /// Confidence of the current frame's rule (0.0 to 1.0); 0.0 for sentinels.
    pub confidence: f32,
}

impl Classification {
    /// A gesture result.
    #[must_use]
    pub const fn gesture(gesture: Gesture, confidence: f32) -> Self {
        Self {
            label: Label::Gesture(gesture),
            confidence,
        }
    }

    /// A sentinel result with zero confidence.
    #[must_use]
    pub const fn sentinel(sentinel: Sentinel) -> Self {
        Self {
            label: Label::Sentinel(sentinel),
            confidence: 0.0,
        }
    }

    /// The recognized gesture, if any.
    #[must_use]
    pub const fn as_gesture(&self) -> Option<Gesture> {
        match self.label {
            Label::Gesture(g) => Some(g),
            Label::Sentinel(_) => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.label, self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_has_zero_confidence() {
        let result = Classification::sentinel(Sentinel::NoHand);
        assert!(result.confidence.abs() < f32::EPSILON);
        assert_eq!(result.as_gesture(), None);
        assert_eq!(result.to_string(), "NO_HAND 0.00");
    }

    #[test]
    fn test_serializes_label_as_string() {
        let result = Classification::gesture(Gesture::CallMe, 0.94);
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["label"], "CALL_ME");
        assert!((json["confidence"].as_f64().unwrap() - 0.94).abs() < 1e-6);
    }
}
