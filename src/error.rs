// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the sign inference library.

use std::fmt;

/// Result type alias for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Main error type for the sign inference library.
#[derive(Debug)]
pub enum InferenceError {
    /// Payload is empty or lacks the `marker,data` layout.
    InvalidFrame(String),
    /// Payload body does not decode to a valid image.
    InvalidImage(String),
    /// The hand-landmark capability cannot run in this deployment.
    UnsupportedEnvironment(String),
    /// Error loading the landmark model.
    ModelLoadError(String),
    /// Error during model inference.
    InferenceError(String),
    /// Error processing images.
    ImageError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
    /// Model output could not be turned into landmarks.
    PostProcessingError(String),
    /// Feature not enabled.
    FeatureNotEnabled(String),
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrame(msg) => write!(f, "Invalid frame: {msg}"),
            Self::InvalidImage(msg) => write!(f, "Invalid image: {msg}"),
            Self::UnsupportedEnvironment(msg) => write!(f, "Unsupported environment: {msg}"),
            Self::ModelLoadError(msg) => write!(f, "Model load error: {msg}"),
            Self::InferenceError(msg) => write!(f, "Inference error: {msg}"),
            Self::ImageError(msg) => write!(f, "Image error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
            Self::PostProcessingError(msg) => write!(f, "Post-processing error: {msg}"),
            Self::FeatureNotEnabled(msg) => write!(f, "Feature not enabled: {msg}"),
        }
    }
}

impl std::error::Error for InferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InferenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<image::ImageError> for InferenceError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageError(err.to_string())
    }
}

impl From<base64::DecodeError> for InferenceError {
    fn from(err: base64::DecodeError) -> Self {
        Self::InvalidImage(format!("body is not valid base64: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InferenceError::InvalidFrame("missing separator".to_string());
        assert_eq!(err.to_string(), "Invalid frame: missing separator");

        let err = InferenceError::UnsupportedEnvironment("no runtime".to_string());
        assert_eq!(err.to_string(), "Unsupported environment: no runtime");
    }

    #[test]
    fn test_base64_error_is_invalid_image() {
        use base64::Engine;
        let err: InferenceError = base64::engine::general_purpose::STANDARD
            .decode("@@@")
            .unwrap_err()
            .into();
        assert!(matches!(err, InferenceError::InvalidImage(_)));
    }
}
