//! Pixel copying: pasting images onto white canvases.

use crate::decode::DecodedImage;

use super::StitchError;

/// White canvas for a pipeline stage, or `DimensionOverflow` past the pixel
/// budget.
pub(crate) fn blank(stage: &'static str, width: u32, height: u32) -> Result<DecodedImage, StitchError> {
    DecodedImage::white(width, height).map_err(|_| StitchError::DimensionOverflow { stage })
}

/// Copy `src` into `dst` with its top-left corner at `(x, y)`.
///
/// Rows and columns falling outside `dst` are clipped.
pub(crate) fn paste(dst: &mut DecodedImage, src: &DecodedImage, x: u32, y: u32) {
    if x >= dst.width || y >= dst.height {
        return;
    }

    let copy_width = src.width.min(dst.width - x) as usize;
    let copy_height = src.height.min(dst.height - y);
    let src_stride = src.width as usize * 3;
    let dst_stride = dst.width as usize * 3;

    for row in 0..copy_height {
        let src_start = row as usize * src_stride;
        let dst_start = (y + row) as usize * dst_stride + x as usize * 3;
        let len = copy_width * 3;

        dst.pixels[dst_start..dst_start + len]
            .copy_from_slice(&src.pixels[src_start..src_start + len]);
    }
}

/// Place equally tall tiles side by side, left to right from x = 0.
///
/// The canvas starts white; with correctly sized tiles every pixel is
/// overwritten.
pub(crate) fn concat_horizontal(tiles: &[DecodedImage]) -> Result<DecodedImage, StitchError> {
    let height = tiles.iter().map(|t| t.height).max().ok_or(StitchError::NoImages)?;
    let width = tiles.iter().try_fold(0u32, |acc, t| {
        acc.checked_add(t.width).ok_or(StitchError::DimensionOverflow {
            stage: "composition",
        })
    })?;

    let mut canvas = blank("composition", width, height)?;
    let mut x_offset = 0;
    for tile in tiles {
        paste(&mut canvas, tile, x_offset, 0);
        x_offset += tile.width;
    }

    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::WHITE;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_paste_at_offset() {
        let mut canvas = blank("test", 4, 4).unwrap();
        paste(&mut canvas, &solid(2, 2, [1, 2, 3]), 1, 2);

        assert_eq!(canvas.pixel(0, 2), Some(WHITE));
        assert_eq!(canvas.pixel(1, 2), Some([1, 2, 3]));
        assert_eq!(canvas.pixel(2, 3), Some([1, 2, 3]));
        assert_eq!(canvas.pixel(3, 3), Some(WHITE));
        assert_eq!(canvas.pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn test_paste_clips_at_edges() {
        let mut canvas = blank("test", 3, 3).unwrap();
        paste(&mut canvas, &solid(5, 5, [9, 9, 9]), 2, 2);

        assert_eq!(canvas.pixel(2, 2), Some([9, 9, 9]));
        assert_eq!(canvas.pixel(1, 1), Some(WHITE));
    }

    #[test]
    fn test_paste_outside_is_noop() {
        let mut canvas = blank("test", 2, 2).unwrap();
        paste(&mut canvas, &solid(1, 1, [0, 0, 0]), 5, 0);
        assert!(canvas.pixels.iter().all(|&p| p == 255));
    }

    #[test]
    fn test_concat_horizontal_order() {
        let red = solid(2, 3, [255, 0, 0]);
        let blue = solid(1, 3, [0, 0, 255]);

        let canvas = concat_horizontal(&[red, blue]).unwrap();

        assert_eq!(canvas.dimensions(), (3, 3));
        assert_eq!(canvas.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(1, 2), Some([255, 0, 0]));
        assert_eq!(canvas.pixel(2, 1), Some([0, 0, 255]));
    }

    #[test]
    fn test_blank_over_budget() {
        assert_eq!(
            blank("border", 1 << 20, 1 << 20),
            Err(StitchError::DimensionOverflow { stage: "border" })
        );
    }

    #[test]
    fn test_concat_horizontal_empty() {
        assert_eq!(concat_horizontal(&[]), Err(StitchError::NoImages));
    }
}
