//! White border around a single image.

use crate::decode::DecodedImage;

use super::compose::{blank, paste};
use super::StitchError;

/// Expand `image` by `border` white pixels on all four sides.
///
/// A zero border returns a copy of the input. Fails with
/// `DimensionOverflow` when the bordered size overflows `u32` or the pixel
/// budget.
pub fn add_border(image: &DecodedImage, border: u32) -> Result<DecodedImage, StitchError> {
    if border == 0 {
        return Ok(image.clone());
    }

    let overflow = || StitchError::DimensionOverflow { stage: "border" };
    let grow = border.checked_mul(2).ok_or_else(overflow)?;
    let width = image.width.checked_add(grow).ok_or_else(overflow)?;
    let height = image.height.checked_add(grow).ok_or_else(overflow)?;

    let mut out = blank("border", width, height)?;
    paste(&mut out, image, border, border);
    Ok(out)
}
