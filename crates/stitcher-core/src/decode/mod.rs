//! Image decoding for uploaded files.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG and GIF uploads into RGB pixel buffers
//! - Applying EXIF orientation and flattening transparency onto white
//! - Image resizing for thumbnails and the stitching pipeline
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use stitcher_core::decode::{decode_image, generate_thumbnail};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let thumb = generate_thumbnail(&image, 150).unwrap();
//! println!("Decoded {}x{}, thumbnail {}x{}", image.width, image.height, thumb.width, thumb.height);
//! ```

mod load;
mod resize;
mod types;

pub use load::decode_image;
pub use resize::{generate_thumbnail, resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation, MAX_PIXELS, WHITE};

pub(crate) use types::buffer_len;
