// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Frame payload decoding.
//!
//! Frames arrive as `marker,data` strings, typically browser data URLs such as
//! `data:image/jpeg;base64,/9j/4AAQ...`. Decoded frames are always returned in
//! RGB channel order.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::DynamicImage;

use crate::error::{InferenceError, Result};

/// Separator between the format marker and the base64 body.
pub const PAYLOAD_SEPARATOR: char = ',';

/// Split a payload into its format marker and base64 body.
///
/// # Errors
///
/// Returns [`InferenceError::InvalidFrame`] if the payload is blank, has no
/// separator, or has an empty marker.
pub fn split_payload(payload: &str) -> Result<(&str, &str)> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(InferenceError::InvalidFrame("empty payload".to_string()));
    }

    let (marker, body) = payload.split_once(PAYLOAD_SEPARATOR).ok_or_else(|| {
        InferenceError::InvalidFrame("payload has no ',' separator".to_string())
    })?;

    if marker.trim().is_empty() {
        return Err(InferenceError::InvalidFrame(
            "payload has no format marker".to_string(),
        ));
    }

    Ok((marker, body))
}

/// Decode a `marker,data` payload into an RGB image.
///
/// # Errors
///
/// * [`InferenceError::InvalidFrame`] - the payload does not have the `marker,data` layout.
/// * [`InferenceError::InvalidImage`] - the body is not base64 or not a supported image.
pub fn decode_payload(payload: &str) -> Result<DynamicImage> {
    let (_marker, body) = split_payload(payload)?;

    // Browsers may wrap long data URLs; whitespace is not part of the alphabet
    let body: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD.decode(body.as_bytes())?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| InferenceError::InvalidImage(format!("cannot decode image: {e}")))?;

    Ok(DynamicImage::ImageRgb8(image.to_rgb8()))
}

/// Build a data-URL payload from encoded image bytes.
///
/// The MIME type is guessed from the bytes and falls back to `image/jpeg`.
#[must_use]
pub fn encode_payload(bytes: &[u8]) -> String {
    let mime = image::guess_format(bytes).map_or("image/jpeg", |f| f.to_mime_type());
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
