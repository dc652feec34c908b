//! Pure dimension planning for a stitch.
//!
//! `plan_layout` performs every size computation of the pipeline without
//! touching pixels. The pipeline sizes each step from the plan, and the
//! session shows the plan's final size as the target resolution, so the two
//! never disagree.

use crate::decode::buffer_len;
use crate::StitchConfig;

use super::StitchError;

/// Placement of one image in the stitched canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    /// Original `(width, height)`.
    pub source: (u32, u32),
    /// Size after the border step.
    pub bordered: (u32, u32),
    /// Left edge of the tile on the unscaled canvas.
    pub x_offset: u32,
}

/// Sizes of every pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StitchLayout {
    /// One entry per input image, in stitch order.
    pub tiles: Vec<TileLayout>,
    /// Tallest bordered image; every tile is normalized to this height.
    pub max_height: u32,
    /// Unscaled canvas `(sum of bordered widths, max_height)`.
    pub canvas: (u32, u32),
    /// Canvas after the global scale.
    pub scaled: (u32, u32),
    /// Final size after the resolution adjustment.
    pub output: (u32, u32),
}

/// Plan a stitch of images with the given `(width, height)` sizes.
///
/// # Errors
///
/// - `NoImages` for an empty list
/// - `ScaleOutOfRange` when the config is invalid
/// - `EmptyImage` for a zero-sized input
/// - `DimensionOverflow` when a size exceeds `u32` or a buffer would exceed
///   [`MAX_PIXELS`](crate::decode::MAX_PIXELS)
/// - `ZeroOutput` when scaling or the resolution mode rounds a side down to zero
pub fn plan_layout(
    sizes: &[(u32, u32)],
    config: &StitchConfig,
) -> Result<StitchLayout, StitchError> {
    config.validate()?;
    if sizes.is_empty() {
        return Err(StitchError::NoImages);
    }

    let grow = config
        .border_width
        .checked_mul(2)
        .ok_or(StitchError::DimensionOverflow { stage: "border" })?;

    let mut tiles = Vec::with_capacity(sizes.len());
    let mut x_offset = 0u32;

    for (index, &(width, height)) in sizes.iter().enumerate() {
        if width == 0 || height == 0 {
            return Err(StitchError::EmptyImage {
                index,
                width,
                height,
            });
        }

        let bordered = (
            width
                .checked_add(grow)
                .ok_or(StitchError::DimensionOverflow { stage: "border" })?,
            height
                .checked_add(grow)
                .ok_or(StitchError::DimensionOverflow { stage: "border" })?,
        );

        tiles.push(TileLayout {
            source: (width, height),
            bordered,
            x_offset,
        });

        x_offset = x_offset
            .checked_add(bordered.0)
            .ok_or(StitchError::DimensionOverflow {
                stage: "composition",
            })?;
    }

    let max_height = tiles.iter().map(|t| t.bordered.1).max().unwrap_or(0);
    let canvas = (x_offset, max_height);
    ensure_within_budget("composition", canvas)?;

    let scaled = (
        scale_dimension(canvas.0, config.scale_percentage)?,
        scale_dimension(canvas.1, config.scale_percentage)?,
    );
    ensure_positive("scale", scaled)?;
    ensure_within_budget("scale", scaled)?;

    let output = config.resolution_mode.apply(scaled);
    ensure_positive("resolution", output)?;

    Ok(StitchLayout {
        tiles,
        max_height,
        canvas,
        scaled,
        output,
    })
}

/// `floor(value * percent / 100)` in exact integer arithmetic.
pub fn scale_dimension(value: u32, percent: u32) -> Result<u32, StitchError> {
    let scaled = value as u64 * percent as u64 / 100;
    u32::try_from(scaled).map_err(|_| StitchError::DimensionOverflow { stage: "scale" })
}

fn ensure_positive(stage: &'static str, (width, height): (u32, u32)) -> Result<(), StitchError> {
    if width == 0 || height == 0 {
        return Err(StitchError::ZeroOutput {
            stage,
            width,
            height,
        });
    }
    Ok(())
}

/// Every tile fits inside the canvas, so checking the canvas and the scaled
/// canvas covers all buffers of the pipeline.
fn ensure_within_budget(stage: &'static str, (width, height): (u32, u32)) -> Result<(), StitchError> {
    match buffer_len(width, height) {
        Some(_) => Ok(()),
        None => Err(StitchError::DimensionOverflow { stage }),
    }
}
