//! Horizontal stitching pipeline.
//!
//! # Pipeline Order
//!
//! Every step consumes the output of the previous one:
//! 1. Border (white, all four sides)
//! 2. Height normalization (pad or fit to the tallest bordered image)
//! 3. Composition (left to right, no gaps)
//! 4. Global scale (percentage, Lanczos3)
//! 5. Resolution adjustment
//!
//! Sizes for every step come from [`plan_layout`], which can be called on its
//! own to preview the output dimensions.

mod border;
mod compose;
mod layout;
mod normalize;
mod types;

pub use border::add_border;
pub use layout::{plan_layout, scale_dimension, StitchLayout, TileLayout};
pub use normalize::{fit_to, normalize_height, pad_to_height};
pub use types::StitchError;

use log::{debug, info};

use crate::decode::{resize, DecodedImage, FilterType};
use crate::{ResolutionMode, StitchConfig};

/// Stitch `images` left to right into one RGB image.
///
/// # Errors
///
/// Returns a [`StitchError`] when the input list is empty, an image is empty
/// or malformed, the config is out of range, or a size computation overflows
/// or collapses to zero.
pub fn stitch(images: &[DecodedImage], config: &StitchConfig) -> Result<DecodedImage, StitchError> {
    for (index, image) in images.iter().enumerate() {
        let expected = (image.width as usize)
            .checked_mul(image.height as usize)
            .and_then(|n| n.checked_mul(3));
        if expected != Some(image.pixels.len()) {
            return Err(StitchError::MalformedImage {
                index,
                expected: expected.unwrap_or(usize::MAX),
                actual: image.pixels.len(),
            });
        }
    }

    let sizes: Vec<(u32, u32)> = images.iter().map(DecodedImage::dimensions).collect();
    let layout = plan_layout(&sizes, config)?;
    debug!(
        "Stitching {} images: canvas {}x{}, scaled {}x{}, output {}x{}",
        images.len(),
        layout.canvas.0,
        layout.canvas.1,
        layout.scaled.0,
        layout.scaled.1,
        layout.output.0,
        layout.output.1
    );

    let tiles = images
        .iter()
        .map(|image| {
            let bordered = add_border(image, config.border_width)?;
            normalize_height(&bordered, layout.max_height, config.pad_mode)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let canvas = compose::concat_horizontal(&tiles)?;
    debug_assert_eq!(canvas.dimensions(), layout.canvas);

    let scaled = resize(&canvas, layout.scaled.0, layout.scaled.1, FilterType::Lanczos3)?;
    let output = adjust_resolution(scaled, config.resolution_mode, layout.output)?;

    info!(
        "Stitched {} images into {}x{}",
        images.len(),
        output.width,
        output.height
    );
    Ok(output)
}

fn adjust_resolution(
    image: DecodedImage,
    mode: ResolutionMode,
    (width, height): (u32, u32),
) -> Result<DecodedImage, StitchError> {
    match mode {
        ResolutionMode::Original => Ok(image),
        // Print300 targets the same size, so this resolves to a copy
        ResolutionMode::Screen72 | ResolutionMode::Print300 => {
            Ok(resize(&image, width, height, FilterType::Lanczos3)?)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::PadMode;
    use proptest::prelude::*;

    fn mode_strategy() -> impl Strategy<Value = PadMode> {
        prop_oneof![Just(PadMode::Pad), Just(PadMode::Scale)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Output size always matches the plan.
        #[test]
        fn prop_output_matches_plan(
            sizes in prop::collection::vec((1u32..=40, 1u32..=40), 1..=4),
            border in 0u32..=4,
            pct in 10u32..=200,
            pad_mode in mode_strategy(),
        ) {
            let images: Vec<DecodedImage> = sizes
                .iter()
                .map(|&(w, h)| DecodedImage::new(w, h, vec![100u8; (w * h * 3) as usize]))
                .collect();
            let config = StitchConfig {
                border_width: border,
                pad_mode,
                scale_percentage: pct,
                resolution_mode: ResolutionMode::Original,
            };

            let plan = plan_layout(&sizes, &config);
            let result = stitch(&images, &config);

            match (plan, result) {
                (Ok(plan), Ok(out)) => prop_assert_eq!(out.dimensions(), plan.output),
                (Err(a), Err(b)) => prop_assert_eq!(a, b),
                (plan, result) => prop_assert!(false, "plan {:?} vs result {:?}", plan, result.map(|i| i.dimensions())),
            }
        }
    }
}
