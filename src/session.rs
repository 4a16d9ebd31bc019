// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Per-client classification session.
//!
//! A [`Session`] owns everything that survives between frames: the vote
//! window, the wrist motion tracker and the landmark detector. Frames from
//! one client must be fed to one session in arrival order.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::classifier::classify;
use crate::detector::{DetectorFactory, DetectorSlot, LandmarkDetector};
use crate::error::Result;
use crate::features::derive_features;
use crate::frame::decode_payload;
use crate::label::Sentinel;
use crate::motion::MotionTracker;
use crate::results::Classification;
use crate::smoothing::VoteWindow;

/// Frame-by-frame gesture classifier with temporal state.
#[derive(Debug)]
pub struct Session {
    window: VoteWindow,
    motion: MotionTracker,
    detector: DetectorSlot,
}

impl Session {
    /// Create a session around a detector slot.
    #[must_use]
    pub fn new(detector: DetectorSlot) -> Self {
        Self {
            window: VoteWindow::new(),
            motion: MotionTracker::new(),
            detector,
        }
    }

    /// Create a session whose detector is built on the first decodable frame.
    #[must_use]
    pub fn with_factory(factory: impl DetectorFactory + 'static) -> Self {
        Self::new(DetectorSlot::lazy(factory))
    }

    /// Create a session around an already-built detector.
    #[must_use]
    pub fn with_detector(detector: impl LandmarkDetector + 'static) -> Self {
        Self::new(DetectorSlot::ready(detector))
    }

    /// Classify one frame payload.
    ///
    /// Never fails: every fault is reported through a sentinel label with
    /// zero confidence. Unexpected faults are logged and reported as `ERROR`.
    pub fn classify_frame(&mut self, payload: &str) -> Classification {
        match self.try_classify(payload) {
            Ok(result) => result,
            Err(e) => {
                let sentinel = Sentinel::from(&e);
                if sentinel == Sentinel::Error {
                    crate::error!("Frame classification failed: {e}");
                }
                Classification::sentinel(sentinel)
            }
        }
    }

    /// Classify one frame payload, surfacing faults as errors.
    ///
    /// A frame without a hand is not an error: it clears the temporal state
    /// and yields `NO_HAND`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is malformed, the image cannot be
    /// decoded, the detector is unavailable, or detection fails.
    pub fn try_classify(&mut self, payload: &str) -> Result<Classification> {
        let image = decode_payload(payload)?;

        let Some(landmarks) = self.detector.detect(&image)? else {
            self.reset();
            return Ok(Classification::sentinel(Sentinel::NoHand));
        };

        let features = derive_features(&landmarks, self.motion.previous_x());
        self.motion.update(landmarks.wrist().x);

        let (provisional, confidence) = classify(&features);
        let smoothed = self.window.push(provisional);
        Ok(Classification::gesture(smoothed, confidence))
    }

    /// Clear the vote window, motion tracker and detector tracking state.
    pub fn reset(&mut self) {
        self.window.clear();
        self.motion.reset();
        self.detector.reset();
    }

    /// Current vote window.
    #[must_use]
    pub const fn window(&self) -> &VoteWindow {
        &self.window
    }

    /// Current motion tracker.
    #[must_use]
    pub const fn motion(&self) -> &MotionTracker {
        &self.motion
    }

    /// Returns whether the detector has been built.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.detector.is_ready()
    }
}

/// Session shared between threads.
///
/// Each call holds the lock for the whole frame, so concurrent callers are
/// serialized and never observe a partially updated window or tracker.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<Session>>,
}

impl SharedSession {
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// See [`Session::classify_frame`].
    pub fn classify_frame(&self, payload: &str) -> Classification {
        self.inner.lock().classify_frame(payload)
    }

    /// See [`Session::try_classify`].
    ///
    /// # Errors
    ///
    /// Same as [`Session::try_classify`].
    pub fn try_classify(&self, payload: &str) -> Result<Classification> {
        self.inner.lock().try_classify(payload)
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    /// Run `f` against the session while holding the lock.
    pub fn with_session<R>(&self, f: impl FnOnce(&Session) -> R) -> R {
        f(&self.inner.lock())
    }

    /// Build the detector now instead of on the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`crate::InferenceError::UnsupportedEnvironment`] if it cannot be built.
    pub fn warm_up(&self) -> Result<()> {
        self.inner.lock().detector.ensure_ready()
    }
}

impl From<Session> for SharedSession {
    fn from(session: Session) -> Self {
        Self::new(session)
    }
}
