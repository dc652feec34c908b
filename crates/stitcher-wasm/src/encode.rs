//! Image encoding WASM bindings.
//!
//! ```typescript
//! import { encode_jpeg_from_image } from '@stitcher/wasm';
//!
//! const jpeg = encode_jpeg_from_image(stitched, 75);
//! const blob = new Blob([jpeg], { type: 'image/jpeg' });
//! ```

use crate::types::JsDecodedImage;
use stitcher_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// `width * height * 3`, a dimension is zero, or encoding fails.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a `JsDecodedImage` to JPEG bytes.
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image_jpeg(&image.to_decoded(), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Default JPEG quality used for downloads.
#[wasm_bindgen]
pub fn default_jpeg_quality() -> u8 {
    encode::DEFAULT_JPEG_QUALITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quality() {
        assert_eq!(default_jpeg_quality(), 75);
    }

    #[test]
    fn test_image_encodes_through_core() {
        let img = JsDecodedImage::new(10, 10, vec![128u8; 10 * 10 * 3]);
        let jpeg = encode::encode_image_jpeg(&img.to_decoded(), 75).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
