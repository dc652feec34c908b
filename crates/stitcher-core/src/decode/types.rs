//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// White in RGB, used for borders, padding and flattened transparency.
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Largest pixel count of any buffer allocated for a stitch (2^28, 768 MiB
/// of RGB). Larger requests fail with an error instead of aborting.
pub const MAX_PIXELS: u64 = 1 << 28;

/// Error types for image decoding operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The bytes were empty.
    #[error("Empty image file")]
    EmptyInput,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has a zero width or height.
    #[error("Image has zero size ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },

    /// The requested image exceeds [`MAX_PIXELS`].
    #[error("Image of {width}x{height} pixels exceeds the size limit")]
    TooLarge { width: u32, height: u32 },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded image with RGB pixel data.
///
/// Images are never mutated in place by the stitching pipeline; every step
/// produces a new `DecodedImage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a solid white image.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::TooLarge` when `width * height` exceeds
    /// [`MAX_PIXELS`] or the buffer length does not fit in `usize`.
    pub fn white(width: u32, height: u32) -> Result<Self, DecodeError> {
        let len = buffer_len(width, height).ok_or(DecodeError::TooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            pixels: vec![255u8; len],
        })
    }

    /// Create a DecodedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// `(width, height)` pair.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the RGB value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }
}

/// RGB byte length of a `width x height` buffer within [`MAX_PIXELS`].
pub(crate) fn buffer_len(width: u32, height: u32) -> Option<usize> {
    let pixels = (width as u64).checked_mul(height as u64)?;
    if pixels > MAX_PIXELS {
        return None;
    }
    usize::try_from(pixels.checked_mul(3)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_decoded_image_creation() {
        let pixels = vec![0u8; 100 * 50 * 3];
        let img = DecodedImage::new(100, 50, pixels);

        assert_eq!(img.dimensions(), (100, 50));
        assert_eq!(img.pixel(99, 49), Some([0, 0, 0]));
    }

    #[test]
    fn test_decoded_image_white() {
        let img = DecodedImage::white(4, 3).unwrap();
        assert_eq!(img.pixels.len(), 36);
        assert!(img.pixels.iter().all(|&p| p == 255));
        assert_eq!(img.pixel(3, 2), Some(WHITE));
        assert_eq!(img.pixel(4, 0), None);
    }

    #[test]
    fn test_white_over_budget_is_error() {
        // (2^31 + 4)^2 * 3 bytes wraps a 32-bit usize and exceeds any heap
        let side = (1u32 << 31) + 4;
        assert_eq!(
            DecodedImage::white(side, side),
            Err(DecodeError::TooLarge {
                width: side,
                height: side
            })
        );
        assert!(DecodedImage::white(u32::MAX, 2).is_err());
    }

    #[test]
    fn test_buffer_len() {
        assert_eq!(buffer_len(4, 3), Some(36));
        assert_eq!(buffer_len(1 << 14, 1 << 14), Some(3 << 28));
        assert_eq!(buffer_len((1 << 14) + 1, 1 << 14), None);
        assert_eq!(buffer_len(u32::MAX, u32::MAX), None);
    }

    #[test]
    fn test_rgb_image_round_trip_keeps_pixels() {
        let img = DecodedImage::new(2, 1, vec![1, 2, 3, 4, 5, 6]);
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.get_pixel(1, 0).0, [4, 5, 6]);
        assert_eq!(DecodedImage::from_rgb_image(rgb), img);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::ZeroSize {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Image has zero size (0x10)");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
