//! Error type for the stitching pipeline.

use thiserror::Error;

use crate::decode::DecodeError;

/// Errors raised while planning or executing a stitch.
///
/// All of these are fatal to the current stitch but never to the caller: a
/// session reports them and stays interactive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StitchError {
    /// Nothing to stitch.
    #[error("No images to stitch")]
    NoImages,

    /// Scale percentage outside 1-200.
    #[error("Scale percentage must be between 1 and 200, got {value}")]
    ScaleOutOfRange { value: u32 },

    /// An input image has a zero width or height.
    #[error("Image {index} is empty ({width}x{height})")]
    EmptyImage { index: usize, width: u32, height: u32 },

    /// An input image's pixel buffer does not match its dimensions.
    #[error("Image {index} has a malformed pixel buffer: expected {expected} bytes, got {actual}")]
    MalformedImage {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// A computed size does not fit the integer or memory range.
    #[error("Output dimensions overflow while computing {stage}")]
    DimensionOverflow { stage: &'static str },

    /// A step would produce an image without pixels.
    #[error("The {stage} step produces an empty image ({width}x{height}); increase the scale")]
    ZeroOutput {
        stage: &'static str,
        width: u32,
        height: u32,
    },

    /// Resampling failed.
    #[error("Resize failed: {0}")]
    Resize(#[from] DecodeError),
}
