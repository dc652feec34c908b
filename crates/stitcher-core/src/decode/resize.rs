//! Image resizing functions for thumbnails and the stitching pipeline.
//!
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{buffer_len, DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns `DecodeError::ZeroSize` if either target dimension is zero,
/// `DecodeError::TooLarge` if the target exceeds [`MAX_PIXELS`](super::MAX_PIXELS)
/// and `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// image dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::ZeroSize { width, height });
    }
    if buffer_len(width, height).is_none() {
        return Err(DecodeError::TooLarge { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgb_image(resized))
}

/// Resize an image to fit within a `max_width x max_height` box while
/// preserving aspect ratio.
///
/// Images that already fit are returned unchanged; this never upscales.
///
/// # Errors
///
/// Returns `DecodeError::ZeroSize` if the box has a zero dimension.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::ZeroSize {
            width: max_width,
            height: max_height,
        });
    }

    if image.width <= max_width && image.height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(image.width, image.height, max_width, max_height);

    resize(image, new_width, new_height, filter)
}

/// Generate a thumbnail for the reorder strip.
///
/// Fits within a `size x size` square with Lanczos3 so small previews stay
/// sharp.
pub fn generate_thumbnail(image: &DecodedImage, size: u32) -> Result<DecodedImage, DecodeError> {
    resize_to_fit(image, size, size, FilterType::Lanczos3)
}

/// Calculate dimensions to fit within a box while preserving aspect ratio.
fn calculate_fit_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);

    let new_width = ((width as f64 * scale).round() as u32).clamp(1, max_width);
    let new_height = ((height as f64 * scale).round() as u32).clamp(1, max_height);
    (new_width, new_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.dimensions(), (50, 25));
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions_is_identity() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Lanczos3).unwrap();

        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_upscale() {
        let img = create_test_image(50, 25);
        let resized = resize(&img, 100, 50, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.dimensions(), (100, 50));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_over_budget_error() {
        let img = create_test_image(4, 4);
        assert_eq!(
            resize(&img, 100_000, 100_000, FilterType::Nearest),
            Err(DecodeError::TooLarge {
                width: 100_000,
                height: 100_000
            })
        );
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = create_test_image(600, 400);
        let resized = resize_to_fit(&img, 150, 150, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.dimensions(), (150, 100));
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = create_test_image(400, 600);
        let resized = resize_to_fit(&img, 150, 150, FilterType::Lanczos3).unwrap();

        assert_eq!(resized.dimensions(), (100, 150));
    }

    #[test]
    fn test_resize_to_fit_rectangular_box() {
        let img = create_test_image(400, 400);
        let resized = resize_to_fit(&img, 200, 100, FilterType::Bilinear).unwrap();

        assert_eq!(resized.dimensions(), (100, 100));
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_image(100, 50);
        let resized = resize_to_fit(&img, 150, 150, FilterType::Bilinear).unwrap();

        // Should return same dimensions when already smaller
        assert_eq!(resized.dimensions(), (100, 50));
    }

    #[test]
    fn test_resize_to_fit_zero_box_error() {
        let img = create_test_image(100, 50);
        assert!(resize_to_fit(&img, 0, 10, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_generate_thumbnail() {
        let img = create_test_image(600, 400);
        let thumb = generate_thumbnail(&img, 150).unwrap();

        assert!(thumb.width <= 150);
        assert!(thumb.height <= 150);
        assert!(thumb.width == 150 || thumb.height == 150);
    }

    #[test]
    fn test_generate_thumbnail_small_image() {
        let img = create_test_image(100, 50);
        let thumb = generate_thumbnail(&img, 150).unwrap();

        // Small images should not be upscaled
        assert_eq!(thumb.dimensions(), (100, 50));
    }

    #[test]
    fn test_calculate_fit_dimensions_extreme_aspect() {
        // A very wide strip keeps at least one pixel of height
        assert_eq!(calculate_fit_dimensions(10_000, 10, 150, 150), (150, 1));
    }

    #[test]
    fn test_calculate_fit_dimensions_zero_input() {
        assert_eq!(calculate_fit_dimensions(0, 0, 150, 150), (0, 0));
    }
}
