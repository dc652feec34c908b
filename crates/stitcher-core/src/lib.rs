//! Stitcher Core - horizontal image stitching library
//!
//! This crate provides decoding of uploaded images, the stitching pipeline
//! (border, pad-or-fit, concatenate, rescale, resolution), input validation,
//! and the interactive session state machine that drives them.

pub mod decode;
pub mod encode;
pub mod session;
pub mod stitch;
pub mod validate;

pub use decode::{decode_image, DecodeError, DecodedImage};
pub use encode::{encode_image_jpeg, EncodeError};
pub use session::{SessionError, SessionEvent, SessionOptions, SessionPhase, StitchSession};
pub use stitch::{plan_layout, stitch, StitchError, StitchLayout};
pub use validate::{parse_order, validate_filename, FilenameError, OrderError, OutputFilename};

/// Smallest accepted global scale, in percent.
pub const MIN_SCALE_PERCENTAGE: u32 = 1;
/// Largest accepted global scale, in percent.
pub const MAX_SCALE_PERCENTAGE: u32 = 200;

/// How images shorter than the tallest one are brought to a common height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PadMode {
    /// Extend with white above and below, keeping all content.
    #[default]
    Pad,
    /// Crop to the target aspect ratio around the center, then resize.
    Scale,
}

impl PadMode {
    /// Human readable label for choice widgets.
    pub fn label(self) -> &'static str {
        match self {
            PadMode::Pad => "Pad with white rectangle",
            PadMode::Scale => "Scale to match height",
        }
    }
}

/// Resize policy applied after the global scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ResolutionMode {
    /// Leave the scaled result as is.
    #[default]
    Original,
    /// Downscale by the fixed 72/300 ratio.
    Screen72,
    /// Resize to identical dimensions. Kept as an identity transform so all
    /// three modes share one code path.
    Print300,
}

impl ResolutionMode {
    /// Human readable label for choice widgets.
    pub fn label(self) -> &'static str {
        match self {
            ResolutionMode::Original => "Original Resolution",
            ResolutionMode::Screen72 => "Optimised for screen (72 dpi)",
            ResolutionMode::Print300 => "Optimised for print (300 dpi)",
        }
    }

    /// Target dimensions for this mode given the scaled canvas size.
    ///
    /// Uses exact integer arithmetic: `floor(w * 72 / 300)` for screen output.
    pub fn apply(self, (width, height): (u32, u32)) -> (u32, u32) {
        match self {
            ResolutionMode::Original | ResolutionMode::Print300 => (width, height),
            ResolutionMode::Screen72 => (
                (width as u64 * 72 / 300) as u32,
                (height as u64 * 72 / 300) as u32,
            ),
        }
    }
}

/// Settings for one stitch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// White border added on all four sides of every image, in pixels
    pub border_width: u32,
    /// Height normalization strategy
    pub pad_mode: PadMode,
    /// Global scale (1 to 200)
    pub scale_percentage: u32,
    /// Post-scale resolution policy
    pub resolution_mode: ResolutionMode,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            border_width: 0,
            pad_mode: PadMode::Pad,
            scale_percentage: 100,
            resolution_mode: ResolutionMode::Original,
        }
    }
}

impl StitchConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the preconditions the pipeline relies on.
    pub fn validate(&self) -> Result<(), StitchError> {
        if !(MIN_SCALE_PERCENTAGE..=MAX_SCALE_PERCENTAGE).contains(&self.scale_percentage) {
            return Err(StitchError::ScaleOutOfRange {
                value: self.scale_percentage,
            });
        }
        Ok(())
    }
}
