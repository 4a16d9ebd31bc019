// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Sign Inference Library
//!
//! Real-time hand-sign recognition from a stream of video frames. Each frame
//! goes through a fixed pipeline:
//!
//! 1. **Decode** a `marker,base64` payload (a browser data URL) into RGB pixels.
//! 2. **Extract** 21 hand landmarks with a single-hand detector.
//! 3. **Derive** five finger-extension flags and the wrist's horizontal movement.
//! 4. **Classify** the features with an ordered rule list.
//! 5. **Smooth** the label by majority vote over the last seven frames.
//!
//! Cross-frame state (vote window, previous wrist position, detector
//! tracking) lives in a [`Session`]. Every failure is reported as a sentinel
//! label with zero confidence, so [`Session::classify_frame`] never fails.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sign_inference::{OnnxDetectorFactory, Session};
//!
//! let mut session = Session::with_factory(OnnxDetectorFactory::new("hand_landmark.onnx"));
//!
//! let payload = "data:image/jpeg;base64,/9j/4AAQSkZJRg...";
//! let result = session.classify_frame(payload);
//! println!("{} {:.2}", result.label, result.confidence);
//! ```
//!
//! ## Labels
//!
//! | Label | Rule | Confidence |
//! |-------|------|------------|
//! | `BYE` | all five fingers extended, wrist moved more than 0.04 | 0.95 |
//! | `HELLO` | all five fingers extended | 0.94 |
//! | `PEACE` | index and middle up, ring and pinky down | 0.93 |
//! | `CALL_ME` | thumb and pinky up, others down | 0.94 |
//! | `YES` | thumb only | 0.92 |
//! | `NO` | no finger extended | 0.90 |
//! | `UNKNOWN` | anything else | 0.40 |
//!
//! Sentinels: `INVALID_FRAME`, `INVALID_IMAGE`, `NO_HAND`, `UNSUPPORTED_ENV`, `ERROR`.
//!
//! ## CLI Usage
//!
//! ```bash
//! # Classify frames in order as one session
//! sign-inference detect --model hand_landmark.onnx --source f1.jpg f2.jpg f3.jpg
//!
//! # Translate text into signs
//! sign-inference voice --text "hello thankyou"
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `onnx` | ONNX Runtime hand-landmark model (default) |
//!
//! ## License
//!
//! This project is licensed under [AGPL-3.0](https://ultralytics.com/license).

// Modules
pub mod classifier;
pub mod cli;
pub mod detector;
pub mod error;
pub mod features;
pub mod frame;
pub mod inference;
pub mod label;
pub mod landmarks;
pub mod model;
pub mod motion;
pub mod postprocessing;
pub mod preprocessing;
pub mod results;
pub mod session;
pub mod smoothing;
pub mod vocabulary;

// Re-export main types for convenience
pub use detector::{DetectorFactory, DetectorSlot, LandmarkDetector};
pub use error::{InferenceError, Result};
pub use features::FeatureVector;
pub use inference::InferenceConfig;
pub use label::{Gesture, Label, Sentinel};
pub use landmarks::{Landmark, LandmarkSet};
pub use model::OnnxDetectorFactory;
#[cfg(feature = "onnx")]
pub use model::HandLandmarkModel;
pub use motion::MotionTracker;
pub use results::Classification;
pub use session::{Session, SharedSession};
pub use smoothing::VoteWindow;
pub use vocabulary::SignEntry;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
