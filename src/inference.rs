// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Landmark detector configuration.
//!
//! This module defines the [`InferenceConfig`] struct, which controls how the
//! hand-landmark detector is built and how it decides that a hand is present.
//! The classification rules themselves are fixed and not configurable.

/// Default hand-presence threshold when no hand was seen on the previous frame.
pub const DEFAULT_DETECTION_CONFIDENCE: f32 = 0.6;

/// Default hand-presence threshold while a hand is being tracked.
pub const DEFAULT_TRACKING_CONFIDENCE: f32 = 0.6;

/// Input size of the hand-landmark network.
pub const DEFAULT_IMGSZ: (usize, usize) = (224, 224);

/// Configuration for the hand-landmark detector.
///
/// # Example
///
/// ```rust
/// use sign_inference::InferenceConfig;
///
/// let config = InferenceConfig::new()
///     .with_detection_confidence(0.5)
///     .with_tracking_confidence(0.5)
///     .with_threads(2);
/// ```
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Minimum hand-presence score to report a hand on a fresh frame (0.0 to 1.0).
    pub min_detection_confidence: f32,
    /// Minimum hand-presence score to keep reporting a hand that was
    /// present on the previous frame (0.0 to 1.0).
    pub min_tracking_confidence: f32,
    /// Model input size (height, width).
    pub imgsz: (usize, usize),
    /// Number of intra-op threads for ONNX Runtime.
    /// Setting this to `0` allows ONNX Runtime to choose the optimal number.
    pub num_threads: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            min_tracking_confidence: DEFAULT_TRACKING_CONFIDENCE,
            imgsz: DEFAULT_IMGSZ,
            num_threads: 0,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detection confidence threshold.
    #[must_use]
    pub const fn with_detection_confidence(mut self, threshold: f32) -> Self {
        self.min_detection_confidence = threshold;
        self
    }

    /// Set the tracking confidence threshold.
    #[must_use]
    pub const fn with_tracking_confidence(mut self, threshold: f32) -> Self {
        self.min_tracking_confidence = threshold;
        self
    }

    /// Set the model input size.
    #[must_use]
    pub const fn with_imgsz(mut self, height: usize, width: usize) -> Self {
        self.imgsz = (height, width);
        self
    }

    /// Set the number of threads for inference.
    ///
    /// # Arguments
    ///
    /// * `threads` - The number of intra-op threads. Set to `0` for auto-configuration.
    #[must_use]
    pub const fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = threads;
        self
    }

    /// Presence threshold to apply, depending on whether a hand is being tracked.
    #[must_use]
    pub const fn presence_threshold(&self, tracking: bool) -> f32 {
        if tracking {
            self.min_tracking_confidence
        } else {
            self.min_detection_confidence
        }
    }

    /// Check that thresholds and sizes are usable.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ConfigError`](crate::InferenceError::ConfigError)
    /// if a threshold is outside [0, 1] or the input size is zero.
    pub fn validate(&self) -> crate::Result<()> {
        for (name, value) in [
            ("min_detection_confidence", self.min_detection_confidence),
            ("min_tracking_confidence", self.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(crate::InferenceError::ConfigError(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.imgsz.0 == 0 || self.imgsz.1 == 0 {
            return Err(crate::InferenceError::ConfigError(
                "imgsz must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
