//! Image encoding for downloads.
//!
//! Stitched results are offered as JPEG only. Quality is configurable
//! through the session options.
//!
//! # Examples
//!
//! ```ignore
//! use stitcher_core::encode::{encode_jpeg, DEFAULT_JPEG_QUALITY};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let jpeg_bytes = encode_jpeg(&pixels, 100, 100, DEFAULT_JPEG_QUALITY).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_image_jpeg, encode_jpeg, EncodeError, DEFAULT_JPEG_QUALITY, JPEG_MIME};
