//! Height normalization: pad or fit every image to the tallest height.

use image::imageops;

use crate::decode::{resize, DecodeError, DecodedImage, FilterType};
use crate::PadMode;

use super::compose::{blank, paste};
use super::StitchError;

/// Bring `image` to `(image.width, height)` with the given strategy.
pub fn normalize_height(
    image: &DecodedImage,
    height: u32,
    mode: PadMode,
) -> Result<DecodedImage, StitchError> {
    match mode {
        PadMode::Pad => pad_to_height(image, height),
        PadMode::Scale => fit_to(image, image.width, height),
    }
}

/// Pad with white to `height`, vertically centered.
///
/// The top gets `floor((height - h) / 2)` rows; any odd row goes to the
/// bottom. Images already at least `height` tall are returned unchanged.
pub fn pad_to_height(image: &DecodedImage, height: u32) -> Result<DecodedImage, StitchError> {
    if image.height >= height {
        return Ok(image.clone());
    }

    let top = (height - image.height) / 2;
    let mut out = blank("pad", image.width, height)?;
    paste(&mut out, image, 0, top);
    Ok(out)
}

/// Crop to the aspect ratio of `width x height` around the center, then
/// resample to exactly that size with Lanczos3.
///
/// Content near the cropped edges is lost; no white is ever introduced.
pub fn fit_to(image: &DecodedImage, width: u32, height: u32) -> Result<DecodedImage, StitchError> {
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    if width == 0 || height == 0 {
        return Err(StitchError::ZeroOutput {
            stage: "fit",
            width,
            height,
        });
    }

    let (crop_width, crop_height) = centered_crop_size(image.width, image.height, width, height);
    let left = (image.width - crop_width) / 2;
    let top = (image.height - crop_height) / 2;

    let cropped = if (crop_width, crop_height) == image.dimensions() {
        image.clone()
    } else {
        let rgb = image
            .to_rgb_image()
            .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;
        let view = imageops::crop_imm(&rgb, left, top, crop_width, crop_height).to_image();
        DecodedImage::from_rgb_image(view)
    };

    Ok(resize(&cropped, width, height, FilterType::Lanczos3)?)
}

/// Largest region of a `src_w x src_h` image with the aspect ratio of
/// `dst_w x dst_h`.
fn centered_crop_size(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32) {
    // Compare src_w / src_h against dst_w / dst_h without division
    let lhs = src_w as u64 * dst_h as u64;
    let rhs = dst_w as u64 * src_h as u64;

    if lhs == rhs {
        (src_w, src_h)
    } else if lhs > rhs {
        // Source is wider: keep full height, crop width
        let w = (dst_w as f64 * src_h as f64 / dst_h as f64).round() as u32;
        (w.clamp(1, src_w), src_h)
    } else {
        // Source is taller: keep full width, crop height
        let h = (dst_h as f64 * src_w as f64 / dst_w as f64).round() as u32;
        (src_w, h.clamp(1, src_h))
    }
}
