//! Stitching WASM bindings.
//!
//! These are the stateless building blocks; most UIs should drive a
//! `JsStitchSession` instead.
//!
//! ```typescript
//! const config = new StitchConfig();
//! config.border_width = 10;
//! config.set_pad_mode(1); // Scale, throws for unknown codes
//!
//! const [w, h] = estimate_resolution(widths, heights, config);
//! const stitched = stitch_images([left, right], config);
//! ```

use crate::types::{
    pad_mode_from_u8, pad_mode_to_u8, resolution_from_u8, resolution_to_u8, unknown_code,
    JsDecodedImage,
};
use stitcher_core::decode::DecodedImage;
use wasm_bindgen::prelude::*;

/// Stitch settings wrapper for JavaScript
#[wasm_bindgen(js_name = StitchConfig)]
#[derive(Debug, Clone, Default)]
pub struct JsStitchConfig {
    inner: stitcher_core::StitchConfig,
}

#[wasm_bindgen(js_class = StitchConfig)]
impl JsStitchConfig {
    /// Create a config with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    #[wasm_bindgen(getter)]
    pub fn border_width(&self) -> u32 {
        self.inner.border_width
    }

    #[wasm_bindgen(setter)]
    pub fn set_border_width(&mut self, value: u32) {
        self.inner.border_width = value;
    }

    /// 0 = Pad, 1 = Scale
    #[wasm_bindgen(getter)]
    pub fn pad_mode(&self) -> u8 {
        pad_mode_to_u8(self.inner.pad_mode)
    }

    pub fn set_pad_mode(&mut self, value: u8) -> Result<(), JsValue> {
        self.inner.pad_mode = pad_mode_from_u8(value)
            .ok_or_else(|| JsValue::from_str(&unknown_code("pad mode", value).to_string()))?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn scale_percentage(&self) -> u32 {
        self.inner.scale_percentage
    }

    /// Range is checked when the config is used.
    #[wasm_bindgen(setter)]
    pub fn set_scale_percentage(&mut self, value: u32) {
        self.inner.scale_percentage = value;
    }

    /// 0 = Original, 1 = Screen (72 dpi), 2 = Print (300 dpi)
    #[wasm_bindgen(getter)]
    pub fn resolution_mode(&self) -> u8 {
        resolution_to_u8(self.inner.resolution_mode)
    }

    pub fn set_resolution_mode(&mut self, value: u8) -> Result<(), JsValue> {
        self.inner.resolution_mode = resolution_from_u8(value)
            .ok_or_else(|| JsValue::from_str(&unknown_code("resolution mode", value).to_string()))?;
        Ok(())
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Build from a plain JS object; missing fields take their defaults
    pub fn from_json(value: JsValue) -> Result<JsStitchConfig, JsValue> {
        let inner: stitcher_core::StitchConfig =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl JsStitchConfig {
    pub(crate) fn inner(&self) -> &stitcher_core::StitchConfig {
        &self.inner
    }
}

/// Label for a pad mode code, or `undefined` for an unknown code.
#[wasm_bindgen]
pub fn pad_mode_label(code: u8) -> Option<String> {
    pad_mode_from_u8(code).map(|mode| mode.label().to_string())
}

/// Label for a resolution mode code, or `undefined` for an unknown code.
#[wasm_bindgen]
pub fn resolution_mode_label(code: u8) -> Option<String> {
    resolution_from_u8(code).map(|mode| mode.label().to_string())
}

/// Stitch images left to right.
///
/// # Errors
///
/// Returns an error for an empty list, an out-of-range scale, or settings
/// that shrink the result to nothing.
#[wasm_bindgen]
pub fn stitch_images(
    images: Vec<JsDecodedImage>,
    config: &JsStitchConfig,
) -> Result<JsDecodedImage, JsValue> {
    let decoded: Vec<DecodedImage> = images
        .into_iter()
        .map(JsDecodedImage::into_decoded)
        .collect();

    stitcher_core::stitch(&decoded, config.inner())
        .map(JsDecodedImage::from_decoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Output `[width, height]` for images of the given sizes, without stitching.
#[wasm_bindgen]
pub fn estimate_resolution(
    widths: &[u32],
    heights: &[u32],
    config: &JsStitchConfig,
) -> Result<Vec<u32>, JsValue> {
    if widths.len() != heights.len() {
        return Err(JsValue::from_str(&format!(
            "Got {} widths but {} heights",
            widths.len(),
            heights.len()
        )));
    }
    let sizes: Vec<(u32, u32)> = widths.iter().copied().zip(heights.iter().copied()).collect();

    stitcher_core::plan_layout(&sizes, config.inner())
        .map(|layout| vec![layout.output.0, layout.output.1])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check a full output filename. Returns the error message, or `undefined`
/// when the name is valid.
#[wasm_bindgen]
pub fn filename_error(filename: &str) -> Option<String> {
    stitcher_core::validate_filename(filename)
        .err()
        .map(|e| e.to_string())
}

/// Parse an order string such as `"2,0,1"` for `len` images.
#[wasm_bindgen]
pub fn parse_order(text: &str, len: usize) -> Result<Vec<u32>, JsValue> {
    stitcher_core::parse_order(text, len)
        .map(|order| order.into_iter().map(|i| i as u32).collect())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = JsStitchConfig::new();
        assert_eq!(config.border_width(), 0);
        assert_eq!(config.pad_mode(), 0);
        assert_eq!(config.scale_percentage(), 100);
        assert_eq!(config.resolution_mode(), 0);
    }

    #[test]
    fn test_config_setters_reach_core() {
        let mut config = JsStitchConfig::new();
        config.set_border_width(5);
        config.set_pad_mode(1).unwrap();
        config.set_scale_percentage(50);
        config.set_resolution_mode(1).unwrap();

        let inner = config.inner();
        assert_eq!(inner.border_width, 5);
        assert_eq!(inner.pad_mode, stitcher_core::PadMode::Scale);
        assert_eq!(inner.scale_percentage, 50);
        assert_eq!(inner.resolution_mode, stitcher_core::ResolutionMode::Screen72);
    }

    #[test]
    fn test_mode_labels() {
        assert_eq!(pad_mode_label(0).as_deref(), Some("Pad with white rectangle"));
        assert_eq!(pad_mode_label(1).as_deref(), Some("Scale to match height"));
        assert_eq!(pad_mode_label(2), None);

        for code in 0..3 {
            assert!(resolution_mode_label(code).is_some());
        }
        assert_eq!(resolution_mode_label(3), None);
    }

    #[test]
    fn test_filename_error() {
        assert_eq!(filename_error("my-file_1.jpg"), None);
        assert!(filename_error("bad file.jpg").is_some());
        assert!(filename_error("image.png").is_some());
        assert!(filename_error("noext").is_some());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn solid(width: u32, height: u32, value: u8) -> JsDecodedImage {
        JsDecodedImage::new(width, height, vec![value; (width * height * 3) as usize])
    }

    #[wasm_bindgen_test]
    fn test_stitch_images_pad() {
        let out = stitch_images(
            vec![solid(100, 200, 0), solid(100, 100, 0)],
            &JsStitchConfig::new(),
        )
        .unwrap();
        assert_eq!(out.width(), 200);
        assert_eq!(out.height(), 200);
    }

    #[wasm_bindgen_test]
    fn test_stitch_images_empty() {
        assert!(stitch_images(Vec::new(), &JsStitchConfig::new()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_estimate_resolution() {
        let mut config = JsStitchConfig::new();
        config.set_resolution_mode(1).unwrap();
        let size = estimate_resolution(&[300], &[150], &config).unwrap();
        assert_eq!(size, vec![72, 36]);
    }

    #[wasm_bindgen_test]
    fn test_estimate_resolution_length_mismatch() {
        assert!(estimate_resolution(&[1, 2], &[1], &JsStitchConfig::new()).is_err());
    }

    #[wasm_bindgen_test]
    fn test_parse_order() {
        assert_eq!(parse_order("2,0,1", 3).unwrap(), vec![2, 0, 1]);
        assert!(parse_order("0,0,1", 3).is_err());
    }

    #[wasm_bindgen_test]
    fn test_config_rejects_unknown_codes() {
        let mut config = JsStitchConfig::new();
        config.set_pad_mode(1).unwrap();
        config.set_resolution_mode(2).unwrap();

        assert!(config.set_pad_mode(7).is_err());
        assert!(config.set_resolution_mode(3).is_err());
        assert_eq!(config.pad_mode(), 1);
        assert_eq!(config.resolution_mode(), 2);
    }

    #[wasm_bindgen_test]
    fn test_config_json_roundtrip() {
        let mut config = JsStitchConfig::new();
        config.set_border_width(7);
        let json = config.to_json().unwrap();
        let back = JsStitchConfig::from_json(json).unwrap();
        assert_eq!(back.border_width(), 7);
    }
}
