//! Geometric transforms over challenge screenshots.

use crate::error::{Result, VisionError};
use image::{DynamicImage, GenericImageView, ImageFormat};
use std::io::Cursor;

/// Top of the challenge band as a fraction of frame height.
///
/// The band offsets are layout constants tied to the target widget, not
/// derived from image content; the instructions sit above the band and the
/// controls below it.
pub const CHALLENGE_BAND_TOP: f32 = 0.10;

/// Bottom of the challenge band as a fraction of frame height.
pub const CHALLENGE_BAND_BOTTOM: f32 = 0.50;

/// Decode a PNG screenshot into an in-memory image.
pub fn decode_png(bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(VisionError::Decode)
}

/// Encode an image as JPEG bytes for VLM upload and artifact storage.
pub fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    // JPEG has no alpha channel; flatten first.
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut bytes = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .map_err(VisionError::Encode)?;
    Ok(bytes)
}

/// Crop a full-frame screenshot to the band containing the challenge body.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn crop_challenge_region(screenshot: &DynamicImage) -> DynamicImage {
    let (w, h) = screenshot.dimensions();
    let top = (h as f32 * CHALLENGE_BAND_TOP) as u32;
    let bottom = (h as f32 * CHALLENGE_BAND_BOTTOM) as u32;
    screenshot.crop_imm(0, top, w, bottom.saturating_sub(top))
}

/// Crop a full-frame screenshot to the region holding the task instructions.
///
/// The classifier reads the top half of the frame, where the widget states
/// what kind of comparison the session requires.
#[must_use]
pub fn crop_instructions_region(screenshot: &DynamicImage) -> DynamicImage {
    let (w, h) = screenshot.dimensions();
    screenshot.crop_imm(0, 0, w, h / 2)
}

/// Bisect the challenge band at the horizontal midpoint.
///
/// Returns `(left, right)`: the reference half and the candidate half. An
/// odd-width band gives the extra column to the right half.
#[must_use]
pub fn split_left_right(image: &DynamicImage) -> (DynamicImage, DynamicImage) {
    let (w, h) = image.dimensions();
    let mid = w / 2;
    let left = image.crop_imm(0, 0, mid, h);
    let right = image.crop_imm(mid, 0, w - mid, h);
    (left, right)
}

/// Strip a uniform-color border from an image.
///
/// Computes the bounding box of pixels that differ from the top-left pixel
/// and crops to it. An image whose pixels all match the seed color is
/// returned unchanged (pure-background edge case). Idempotent: trimming a
/// trimmed image is a no-op.
#[must_use]
pub fn trim_uniform_border(image: &DynamicImage) -> DynamicImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }

    let rgba = image.to_rgba8();
    let seed = *rgba.get_pixel(0, 0);

    let mut min_x = w;
    let mut min_y = h;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut any = false;

    for (x, y, pixel) in rgba.enumerate_pixels() {
        if *pixel != seed {
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    if !any {
        return image.clone();
    }

    image.crop_imm(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
}
