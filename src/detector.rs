// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Hand-landmark detector abstraction.
//!
//! A [`LandmarkDetector`] turns a decoded frame into at most one
//! [`LandmarkSet`]. Detectors are expensive to build and not reentrant, so a
//! session owns exactly one, built on first use through a
//! [`DetectorFactory`] held in a [`DetectorSlot`].

use std::fmt;

use image::DynamicImage;

use crate::error::{InferenceError, Result};
use crate::landmarks::LandmarkSet;

/// Single-hand landmark detector.
pub trait LandmarkDetector: Send {
    /// Detect one hand in `image`.
    ///
    /// Returns `Ok(None)` when no hand is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the detector fails to run on the frame.
    fn detect(&mut self, image: &DynamicImage) -> Result<Option<LandmarkSet>>;

    /// Forget any cross-frame tracking state.
    fn reset(&mut self) {}
}

/// Builds a detector on first use.
pub trait DetectorFactory: Send {
    /// Construct the detector.
    ///
    /// # Errors
    ///
    /// Returns an error if the detection capability is unavailable.
    fn create(&self) -> Result<Box<dyn LandmarkDetector>>;
}

impl<F> DetectorFactory for F
where
    F: Fn() -> Result<Box<dyn LandmarkDetector>> + Send,
{
    fn create(&self) -> Result<Box<dyn LandmarkDetector>> {
        self()
    }
}

/// One-time initialization guard around a detector.
///
/// A failed construction is remembered: the slot stays unavailable and every
/// later call reports [`InferenceError::UnsupportedEnvironment`] without
/// rebuilding.
pub enum DetectorSlot {
    /// Not built yet.
    Uninitialized(Box<dyn DetectorFactory>),
    /// Built and usable.
    Ready(Box<dyn LandmarkDetector>),
    /// Construction failed with the stored reason.
    Unavailable(String),
}

impl DetectorSlot {
    /// Slot that builds its detector lazily from `factory`.
    #[must_use]
    pub fn lazy(factory: impl DetectorFactory + 'static) -> Self {
        Self::Uninitialized(Box::new(factory))
    }

    /// Slot holding an already-built detector.
    #[must_use]
    pub fn ready(detector: impl LandmarkDetector + 'static) -> Self {
        Self::Ready(Box::new(detector))
    }

    /// Build the detector if needed.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::UnsupportedEnvironment`] if construction
    /// failed, now or on an earlier call.
    pub fn ensure_ready(&mut self) -> Result<()> {
        if let Self::Uninitialized(factory) = self {
            let next = match factory.create() {
                Ok(detector) => Self::Ready(detector),
                Err(e) => {
                    crate::warn!("Hand-landmark detector unavailable: {e}");
                    Self::Unavailable(e.to_string())
                }
            };
            *self = next;
        }

        match self {
            Self::Ready(_) => Ok(()),
            Self::Unavailable(reason) => Err(InferenceError::UnsupportedEnvironment(reason.clone())),
            Self::Uninitialized(_) => Err(InferenceError::InferenceError(
                "detector initialization did not complete".to_string(),
            )),
        }
    }

    /// Run the detector, building it first if needed.
    ///
    /// # Errors
    ///
    /// Propagates construction and detection failures.
    pub fn detect(&mut self, image: &DynamicImage) -> Result<Option<LandmarkSet>> {
        self.ensure_ready()?;
        match self {
            Self::Ready(detector) => detector.detect(image),
            _ => Err(InferenceError::InferenceError("detector is not ready".to_string())),
        }
    }

    /// Reset tracking state of a built detector.
    pub fn reset(&mut self) {
        if let Self::Ready(detector) = self {
            detector.reset();
        }
    }

    /// Returns whether the detector has been built.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

impl fmt::Debug for DetectorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized(_) => f.write_str("DetectorSlot::Uninitialized"),
            Self::Ready(_) => f.write_str("DetectorSlot::Ready"),
            Self::Unavailable(reason) => write!(f, "DetectorSlot::Unavailable({reason})"),
        }
    }
}
