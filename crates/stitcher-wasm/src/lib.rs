//! Stitcher WASM - WebAssembly bindings for the image stitcher
//!
//! This crate exposes the stitcher-core functionality to JavaScript/TypeScript
//! applications.
//!
//! # Module Structure
//!
//! - `session` - The interactive `StitchSession` driven by UI widgets
//! - `stitch` - Stateless stitching, estimation and validation
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding and resizing bindings
//! - `encode` - JPEG encoding bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { StitchSession, set_log_level } from '@stitcher/wasm';
//!
//! await init();
//! set_log_level('debug');
//!
//! const session = new StitchSession();
//! session.add_file(file.name, new Uint8Array(await file.arrayBuffer()));
//! const preview = session.stitch();
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod logger;
mod session;
mod stitch;
mod types;

// Re-export public types
pub use decode::{decode_image, generate_thumbnail, resize, resize_to_fit};
pub use encode::{default_jpeg_quality, encode_jpeg, encode_jpeg_from_image};
pub use session::{JsDownload, JsStitchSession, JsThumbnail};
pub use stitch::{
    estimate_resolution, filename_error, pad_mode_label, parse_order, resolution_mode_label,
    stitch_images, JsStitchConfig,
};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
///
/// Panics are reported on the console with their message instead of an
/// opaque `unreachable` trap.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    log::debug!("stitcher-wasm {} loaded", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Set the console log level: off, error, warn, info, debug or trace.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter = logger::parse_level(level)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown log level '{}'", level)))?;
    log::set_max_level(filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_set_log_level_known() {
        assert!(set_log_level("warn").is_ok());
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
    }
}
