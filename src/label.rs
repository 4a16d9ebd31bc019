// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Output labels for sign classification.
//!
//! A classification call yields either a recognized [`Gesture`] or a
//! [`Sentinel`] describing why no gesture could be produced. Both render
//! to the fixed upper-case strings used on the wire.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::InferenceError;

/// Recognized hand gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Open palm moving sideways.
    Bye,
    /// Open palm held still.
    Hello,
    /// Index and middle finger raised.
    Peace,
    /// Thumb and pinky raised.
    CallMe,
    /// Thumb only.
    Yes,
    /// Closed fist.
    No,
    /// Pose matched none of the rules.
    Unknown,
}

impl Gesture {
    /// All gestures in rule order.
    pub const ALL: [Self; 7] = [
        Self::Bye,
        Self::Hello,
        Self::Peace,
        Self::CallMe,
        Self::Yes,
        Self::No,
        Self::Unknown,
    ];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bye => "BYE",
            Self::Hello => "HELLO",
            Self::Peace => "PEACE",
            Self::CallMe => "CALL_ME",
            Self::Yes => "YES",
            Self::No => "NO",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// Input and error outcomes that replace a gesture label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Payload missing the expected format marker or separator.
    InvalidFrame,
    /// Payload present but not a decodable image.
    InvalidImage,
    /// Frame decoded but no hand was found.
    NoHand,
    /// The landmark detector cannot run here.
    UnsupportedEnv,
    /// Any other failure during processing.
    Error,
}

impl Sentinel {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidFrame => "INVALID_FRAME",
            Self::InvalidImage => "INVALID_IMAGE",
            Self::NoHand => "NO_HAND",
            Self::UnsupportedEnv => "UNSUPPORTED_ENV",
            Self::Error => "ERROR",
        }
    }
}

impl From<&InferenceError> for Sentinel {
    fn from(err: &InferenceError) -> Self {
        match err {
            InferenceError::InvalidFrame(_) => Self::InvalidFrame,
            InferenceError::InvalidImage(_) | InferenceError::ImageError(_) => Self::InvalidImage,
            InferenceError::UnsupportedEnvironment(_) | InferenceError::FeatureNotEnabled(_) => {
                Self::UnsupportedEnv
            }
            _ => Self::Error,
        }
    }
}

/// Label returned to callers: a gesture or a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// A recognized gesture.
    Gesture(Gesture),
    /// An input or processing outcome.
    Sentinel(Sentinel),
}

impl Label {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gesture(g) => g.as_str(),
            Self::Sentinel(s) => s.as_str(),
        }
    }

    /// Returns whether this label is a sentinel.
    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::Sentinel(_))
    }
}

impl From<Gesture> for Label {
    fn from(gesture: Gesture) -> Self {
        Self::Gesture(gesture)
    }
}

impl From<Sentinel> for Label {
    fn from(sentinel: Sentinel) -> Self {
        Self::Sentinel(sentinel)
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
