//! Render output of a session: everything the UI displays.

use serde::Serialize;

use crate::StitchConfig;

use super::SessionPhase;

/// A thumbnail slot in the reorder strip.
///
/// Pixels are fetched separately through `StitchSession::thumbnails`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThumbnailView {
    /// Upload position this slot shows.
    pub index: usize,
    pub caption: String,
    pub width: u32,
    pub height: u32,
}

/// A file that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileErrorView {
    pub index: usize,
    pub name: String,
    pub message: String,
}

/// Snapshot of all derived display values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub phase: SessionPhase,
    /// Thumbnails of decodable files, in current order.
    pub thumbnails: Vec<ThumbnailView>,
    pub order_text: String,
    /// Last valid order.
    pub order: Vec<usize>,
    pub config: StitchConfig,
    /// Output size the next stitch will produce.
    pub target_resolution: Option<(u32, u32)>,
    /// `target_resolution` as the line shown under the controls.
    pub target_resolution_text: Option<String>,
    pub estimate_error: Option<String>,
    pub filename: String,
    pub filename_error: Option<String>,
    pub file_errors: Vec<FileErrorView>,
    /// Message of the last failure, while in the error phase.
    pub message: Option<String>,
    /// Output size of the current preview.
    pub preview_size: Option<(u32, u32)>,
}

/// An encoded file ready to be saved by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}
