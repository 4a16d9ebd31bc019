// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Image preprocessing for hand-landmark inference.
//!
//! Frames are letterboxed into the square network input, normalized to
//! [0, 1] and laid out as an NHWC tensor. The transform is recorded so that
//! keypoints can be mapped back to the original frame.

#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::{DynamicImage, GenericImageView};
use ndarray::Array4;

use crate::error::{InferenceError, Result};

/// Reciprocal of 255 for normalization.
const INV_255: f32 = 1.0 / 255.0;

/// Result of preprocessing an image, containing the tensor and transform info.
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    /// Preprocessed image tensor in NHWC format, normalized to [0, 1].
    pub tensor: Array4<f32>,
    /// Original image dimensions (height, width).
    pub orig_shape: (u32, u32),
    /// Scale factors applied (`scale_y`, `scale_x`).
    pub scale: (f32, f32),
    /// Padding applied (`pad_top`, `pad_left`).
    pub padding: (f32, f32),
}

impl PreprocessResult {
    /// Map a point from network input pixels to normalized original-image coordinates.
    #[must_use]
    pub fn to_normalized(&self, x: f32, y: f32) -> (f32, f32) {
        let (orig_h, orig_w) = (self.orig_shape.0 as f32, self.orig_shape.1 as f32);
        let (ox, oy) = scale_point(x, y, self.scale, self.padding);
        (ox / orig_w, oy / orig_h)
    }
}

/// Letterbox an image into `target_size` and convert it to an NHWC tensor.
///
/// # Arguments
///
/// * `image` - Input image (any color type, converted to RGB).
/// * `target_size` - Target size as (height, width).
///
/// # Errors
///
/// Returns [`InferenceError::ImageError`] for empty images or resize failures.
pub fn preprocess_image(image: &DynamicImage, target_size: (usize, usize)) -> Result<PreprocessResult> {
    let (orig_width, orig_height) = image.dimensions();
    if orig_width == 0 || orig_height == 0 {
        return Err(InferenceError::ImageError("image has zero size".to_string()));
    }

    let (new_width, new_height, pad_left, pad_top, scale) =
        calculate_letterbox_params(orig_width, orig_height, target_size);

    let src_rgb = image.to_rgb8();
    let src_image = Image::from_vec_u8(orig_width, orig_height, src_rgb.into_raw(), PixelType::U8x3)
        .map_err(|e| InferenceError::ImageError(format!("Failed to create source image: {e}")))?;
    let mut dst_image = Image::new(new_width, new_height, PixelType::U8x3);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
    resizer
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| InferenceError::ImageError(format!("Failed to resize image: {e}")))?;

    let (dst_h, dst_w) = target_size;
    let mut tensor = Array4::<f32>::zeros((1, dst_h, dst_w, 3));
    let resized = dst_image.buffer();
    let row_len = new_width as usize * 3;

    for (iy, row) in resized.chunks_exact(row_len).enumerate() {
        let ty = iy + pad_top as usize;
        for (ix, px) in row.chunks_exact(3).enumerate() {
            let tx = ix + pad_left as usize;
            for (c, &v) in px.iter().enumerate() {
                tensor[[0, ty, tx, c]] = f32::from(v) * INV_255;
            }
        }
    }

    Ok(PreprocessResult {
        tensor,
        orig_shape: (orig_height, orig_width),
        scale,
        padding: (pad_top as f32, pad_left as f32),
    })
}

/// Calculate letterbox parameters.
///
/// # Returns
///
/// 1. `new_width`: Scaled width.
/// 2. `new_height`: Scaled height.
/// 3. `pad_left`: Left padding.
/// 4. `pad_top`: Top padding.
/// 5. `(scale_y, scale_x)`: Scale factors.
fn calculate_letterbox_params(
    orig_width: u32,
    orig_height: u32,
    target_size: (usize, usize),
) -> (u32, u32, u32, u32, (f32, f32)) {
    let (target_h, target_w) = (target_size.0 as f32, target_size.1 as f32);
    let (orig_h, orig_w) = (orig_height as f32, orig_width as f32);

    // Fit within target while maintaining aspect ratio
    let scale = (target_h / orig_h).min(target_w / orig_w);

    let new_w = ((orig_w * scale).round() as u32).clamp(1, target_size.1 as u32);
    let new_h = ((orig_h * scale).round() as u32).clamp(1, target_size.0 as u32);

    let pad_left = (target_size.1 as u32).saturating_sub(new_w) / 2;
    let pad_top = (target_size.0 as u32).saturating_sub(new_h) / 2;

    let scale_x = new_w as f32 / orig_w;
    let scale_y = new_h as f32 / orig_h;

    (new_w, new_h, pad_left, pad_top, (scale_y, scale_x))
}

/// Scale a point from model input space back to original image pixels.
///
/// # Arguments
///
/// * `x`, `y` - Point in model space (after letterbox).
/// * `scale` - Scale factors (`scale_y`, `scale_x`) from preprocessing.
/// * `padding` - Padding (`pad_top`, `pad_left`) from preprocessing.
#[must_use]
pub fn scale_point(x: f32, y: f32, scale: (f32, f32), padding: (f32, f32)) -> (f32, f32) {
    let (scale_y, scale_x) = scale;
    let (pad_top, pad_left) = padding;
    ((x - pad_left) / scale_x, (y - pad_top) / scale_y)
}
