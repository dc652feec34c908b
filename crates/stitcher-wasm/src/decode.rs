//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode a JPEG, PNG or GIF upload to RGB
//! - [`resize`] - Resize an image to exact dimensions
//! - [`resize_to_fit`] - Fit an image within a box, preserving aspect ratio
//! - [`generate_thumbnail`] - Thumbnail for the reorder strip
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, generate_thumbnail } from '@stitcher/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! const thumb = generate_thumbnail(image, 150);
//! ```

use crate::types::{filter_from_u8, JsDecodedImage};
use stitcher_core::decode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image.
///
/// The format is detected from the bytes. EXIF orientation is applied and
/// transparency is flattened onto white.
///
/// # Errors
///
/// Returns an error if the format is not supported or the file is corrupted.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// `filter`: 0=Nearest, 1=Bilinear, 2=Lanczos3.
#[wasm_bindgen]
pub fn resize(
    image: &JsDecodedImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    let decoded = image.to_decoded();

    decode::resize(&decoded, width, height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Fit an image within `max_width x max_height`, never upscaling.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsDecodedImage,
    max_width: u32,
    max_height: u32,
    filter: u8,
) -> Result<JsDecodedImage, JsValue> {
    let decoded = image.to_decoded();

    decode::resize_to_fit(&decoded, max_width, max_height, filter_from_u8(filter))
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generate a thumbnail fitting within a `size x size` square (Lanczos3).
#[wasm_bindgen]
pub fn generate_thumbnail(image: &JsDecodedImage, size: u32) -> Result<JsDecodedImage, JsValue> {
    let decoded = image.to_decoded();

    decode::generate_thumbnail(&decoded, size)
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// WASM-specific tests. The underlying behavior is covered natively in
/// `stitcher_core::decode`.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn gray(width: u32, height: u32) -> JsDecodedImage {
        JsDecodedImage::new(width, height, vec![128u8; (width * height * 3) as usize])
    }

    #[wasm_bindgen_test]
    fn test_decode_image_invalid() {
        assert!(decode_image(&[0, 1, 2, 3]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_image_empty() {
        assert!(decode_image(&[]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_decode_encoded_roundtrip_dimensions() {
        let jpeg = crate::encode::encode_jpeg_from_image(&gray(40, 30), 90).unwrap();
        let decoded = decode_image(&jpeg).unwrap();
        assert_eq!(decoded.width(), 40);
        assert_eq!(decoded.height(), 30);
    }

    #[wasm_bindgen_test]
    fn test_resize_creates_new_image() {
        let resized = resize(&gray(100, 50), 50, 25, 1).unwrap();
        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 25);
    }

    #[wasm_bindgen_test]
    fn test_resize_zero_width_errors() {
        assert!(resize(&gray(100, 50), 0, 25, 1).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_to_fit_box() {
        let resized = resize_to_fit(&gray(200, 100), 100, 100, 2).unwrap();
        assert_eq!(resized.width(), 100);
        assert_eq!(resized.height(), 50);
    }

    #[wasm_bindgen_test]
    fn test_generate_thumbnail() {
        let thumb = generate_thumbnail(&gray(400, 300), 150).unwrap();
        assert_eq!(thumb.width(), 150);
        assert_eq!(thumb.height(), 113);
    }
}
