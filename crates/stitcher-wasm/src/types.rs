//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core stitcher
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use stitcher_core::decode::{DecodedImage, FilterType};
use stitcher_core::session::ValidationError;
use stitcher_core::{PadMode, ResolutionMode};
use wasm_bindgen::prelude::*;

/// A decoded RGB image handed to JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it into a
/// `Uint8Array`, so keep images on the WASM side until they are drawn.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel,
    /// row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// RGB pixel data as a `Uint8Array` copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// RGBA pixel data with opaque alpha, ready for `new ImageData(...)`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(px);
            rgba.push(255);
        }
        rgba
    }

    /// Explicitly free WASM memory instead of waiting for the finalizer.
    pub fn free(self) {}
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Copy back into a core image.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }

    pub(crate) fn into_decoded(self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels,
        }
    }
}

/// Resize filter from its numeric code.
///
/// 0 = Nearest, 1 = Bilinear, 2 = Lanczos3. Anything else is Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

/// 0 = Pad, 1 = Scale.
pub(crate) fn pad_mode_from_u8(value: u8) -> Option<PadMode> {
    match value {
        0 => Some(PadMode::Pad),
        1 => Some(PadMode::Scale),
        _ => None,
    }
}

pub(crate) fn pad_mode_to_u8(mode: PadMode) -> u8 {
    match mode {
        PadMode::Pad => 0,
        PadMode::Scale => 1,
    }
}

/// 0 = Original, 1 = Screen (72 dpi), 2 = Print (300 dpi).
pub(crate) fn resolution_from_u8(value: u8) -> Option<ResolutionMode> {
    match value {
        0 => Some(ResolutionMode::Original),
        1 => Some(ResolutionMode::Screen72),
        2 => Some(ResolutionMode::Print300),
        _ => None,
    }
}

pub(crate) fn resolution_to_u8(mode: ResolutionMode) -> u8 {
    match mode {
        ResolutionMode::Original => 0,
        ResolutionMode::Screen72 => 1,
        ResolutionMode::Print300 => 2,
    }
}

pub(crate) fn unknown_code(setting: &'static str, value: u8) -> ValidationError {
    ValidationError::UnknownChoice {
        setting,
        value: value.to_string(),
    }
}
