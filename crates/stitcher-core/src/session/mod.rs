//! Interactive stitching session.
//!
//! A [`StitchSession`] owns the uploads and every widget value of the UI.
//! Input arrives as [`SessionEvent`]s; derived display values are recomputed
//! on [`StitchSession::render`]. Stitching and downloading are explicit
//! actions.
//!
//! # Phases
//!
//! ```text
//! Empty -> Configuring -> Previewing -> Stitched
//!              ^  any failure -> Error  |
//!              +---- next input event --+
//! ```
//!
//! Any input event while previewing drops the result and returns to
//! `Configuring` (or `Empty` once the last file is removed).

mod error;
mod upload;
mod view;

pub use error::{SessionError, ValidationError};
pub use upload::UploadedFile;
pub use view::{Download, FileErrorView, SessionView, ThumbnailView};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;
use crate::encode::{encode_image_jpeg, DEFAULT_JPEG_QUALITY, JPEG_MIME};
use crate::stitch::{add_border, plan_layout, stitch};
use crate::validate::{
    default_order_text, is_accepted_upload, parse_order, validate_filename, JpegExtension,
    OutputFilename,
};
use crate::{PadMode, ResolutionMode, StitchConfig, MAX_SCALE_PERCENTAGE, MIN_SCALE_PERCENTAGE};

/// Fixed per-session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Thumbnails fit within a square of this size.
    pub thumbnail_size: u32,
    pub jpeg_quality: u8,
    /// Filename base shown before the user edits it.
    pub default_filename: String,
}

impl SessionOptions {
    /// Reject options no session can work with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.thumbnail_size == 0 {
            return Err(ValidationError::ZeroThumbnailSize);
        }
        Ok(())
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            thumbnail_size: 150,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            default_filename: "stitched_image".to_string(),
        }
    }
}

/// A file as handed over by the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// User input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    FilesAdded(Vec<FileUpload>),
    /// Remove the upload at this upload position.
    FileRemoved(usize),
    /// Raw text of the order field.
    OrderChanged(String),
    BorderWidthChanged(u32),
    PadModeChanged(PadMode),
    ScalePercentageChanged(u32),
    ResolutionModeChanged(ResolutionMode),
    /// Filename base, without extension.
    FilenameChanged(String),
    ExtensionChanged(JpegExtension),
}

impl SessionEvent {
    /// Short name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::FilesAdded(_) => "files_added",
            SessionEvent::FileRemoved(_) => "file_removed",
            SessionEvent::OrderChanged(_) => "order_changed",
            SessionEvent::BorderWidthChanged(_) => "border_width_changed",
            SessionEvent::PadModeChanged(_) => "pad_mode_changed",
            SessionEvent::ScalePercentageChanged(_) => "scale_percentage_changed",
            SessionEvent::ResolutionModeChanged(_) => "resolution_mode_changed",
            SessionEvent::FilenameChanged(_) => "filename_changed",
            SessionEvent::ExtensionChanged(_) => "extension_changed",
        }
    }
}

/// Where the session is in its flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Empty,
    Configuring,
    Previewing,
    Stitched,
    Error,
}

#[derive(Debug)]
enum SessionState {
    Empty,
    Configuring,
    Previewing {
        preview: DecodedImage,
        filename: OutputFilename,
    },
    Stitched {
        preview: DecodedImage,
        download: Download,
    },
    Error {
        message: String,
    },
}

impl SessionState {
    fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Empty => SessionPhase::Empty,
            SessionState::Configuring => SessionPhase::Configuring,
            SessionState::Previewing { .. } => SessionPhase::Previewing,
            SessionState::Stitched { .. } => SessionPhase::Stitched,
            SessionState::Error { .. } => SessionPhase::Error,
        }
    }
}

/// A bordered thumbnail in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub index: usize,
    pub caption: String,
    pub image: DecodedImage,
}

/// Single-user stitching session.
#[derive(Debug)]
pub struct StitchSession {
    options: SessionOptions,
    files: Vec<UploadedFile>,
    order: Vec<usize>,
    order_text: String,
    config: StitchConfig,
    filename_base: String,
    extension: JpegExtension,
    state: SessionState,
}

impl Default for StitchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StitchSession {
    pub fn new() -> Self {
        Self::from_valid_options(SessionOptions::default())
    }

    /// # Errors
    ///
    /// Returns `ZeroThumbnailSize` for `thumbnail_size == 0`.
    pub fn with_options(options: SessionOptions) -> Result<Self, SessionError> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    fn from_valid_options(options: SessionOptions) -> Self {
        let filename_base = options.default_filename.clone();
        Self {
            options,
            files: Vec::new(),
            order: Vec::new(),
            order_text: String::new(),
            config: StitchConfig::default(),
            filename_base,
            extension: JpegExtension::default(),
            state: SessionState::Empty,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn config(&self) -> &StitchConfig {
        &self.config
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    /// Last valid order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Filename base joined with the chosen extension, not yet validated.
    pub fn full_filename(&self) -> String {
        format!("{}.{}", self.filename_base, self.extension.as_str())
    }

    /// The stitched result, while previewing or after download.
    pub fn preview(&self) -> Option<&DecodedImage> {
        match &self.state {
            SessionState::Previewing { preview, .. } | SessionState::Stitched { preview, .. } => {
                Some(preview)
            }
            _ => None,
        }
    }

    /// Apply one input event.
    ///
    /// On success the session returns to `Configuring` (or `Empty`),
    /// discarding any previous result. On failure it enters `Error` and
    /// rejected values are not applied.
    pub fn handle(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        debug!("Session event: {}", event.kind());
        match self.apply(event) {
            Ok(()) => {
                self.state = self.idle_state();
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn apply(&mut self, event: SessionEvent) -> Result<(), SessionError> {
        match event {
            SessionEvent::FilesAdded(uploads) => {
                if let Some(bad) = uploads.iter().find(|u| !is_accepted_upload(&u.name)) {
                    return Err(ValidationError::UnsupportedUpload {
                        name: bad.name.clone(),
                    }
                    .into());
                }
                if uploads.is_empty() {
                    return Ok(());
                }
                info!("Added {} file(s)", uploads.len());
                self.files.extend(
                    uploads
                        .into_iter()
                        .map(|u| UploadedFile::new(u.name, u.bytes)),
                );
                self.reset_order();
            }
            SessionEvent::FileRemoved(index) => {
                if index >= self.files.len() {
                    return Err(ValidationError::NoSuchFile { index }.into());
                }
                let removed = self.files.remove(index);
                info!("Removed '{}'", removed.name());
                self.reset_order();
            }
            SessionEvent::OrderChanged(text) => {
                self.order_text = text;
                if self.files.is_empty() {
                    return Err(ValidationError::NoFiles.into());
                }
                self.order = parse_order(&self.order_text, self.files.len())?;
            }
            SessionEvent::BorderWidthChanged(width) => self.config.border_width = width,
            SessionEvent::PadModeChanged(mode) => self.config.pad_mode = mode,
            SessionEvent::ScalePercentageChanged(value) => {
                if !(MIN_SCALE_PERCENTAGE..=MAX_SCALE_PERCENTAGE).contains(&value) {
                    return Err(ValidationError::ScaleOutOfRange {
                        value,
                        min: MIN_SCALE_PERCENTAGE,
                        max: MAX_SCALE_PERCENTAGE,
                    }
                    .into());
                }
                self.config.scale_percentage = value;
            }
            SessionEvent::ResolutionModeChanged(mode) => self.config.resolution_mode = mode,
            SessionEvent::FilenameChanged(base) => self.filename_base = base,
            SessionEvent::ExtensionChanged(ext) => self.extension = ext,
        }
        Ok(())
    }

    fn reset_order(&mut self) {
        self.order = (0..self.files.len()).collect();
        self.order_text = default_order_text(self.files.len());
    }

    fn idle_state(&self) -> SessionState {
        if self.files.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Configuring
        }
    }

    /// Record input that could not be turned into a [`SessionEvent`], such
    /// as an unknown widget code. The session enters `Error` exactly as if
    /// an event had been rejected.
    pub fn reject_input(&mut self, err: ValidationError) -> SessionError {
        self.fail(err.into())
    }

    fn fail(&mut self, err: SessionError) -> SessionError {
        warn!("{}", err);
        self.state = SessionState::Error {
            message: err.to_string(),
        };
        err
    }

    /// Stitch the uploads in the current order.
    ///
    /// Validates the filename, decodes every file, then runs the pipeline.
    /// On success the session is `Previewing` and [`preview`](Self::preview)
    /// returns the result.
    pub fn stitch(&mut self) -> Result<(), SessionError> {
        match self.run_stitch() {
            Ok((preview, filename)) => {
                info!(
                    "Preview ready: {}x{} as {}",
                    preview.width, preview.height, filename
                );
                self.state = SessionState::Previewing { preview, filename };
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn run_stitch(&self) -> Result<(DecodedImage, OutputFilename), SessionError> {
        if self.files.is_empty() {
            return Err(ValidationError::NoFiles.into());
        }
        let filename = validate_filename(&self.full_filename())?;

        let images = self
            .ordered_files()
            .map(|(_, file)| {
                file.decoded()
                    .cloned()
                    .map_err(|source| SessionError::Decode {
                        name: file.name().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let preview = stitch(&images, &self.config)?;
        Ok((preview, filename))
    }

    /// Encode the preview to JPEG.
    ///
    /// The first call moves the session to `Stitched`; later calls return
    /// the same file.
    pub fn download(&mut self) -> Result<Download, SessionError> {
        let result = match &self.state {
            SessionState::Stitched { download, .. } => return Ok(download.clone()),
            SessionState::Previewing { preview, filename } => {
                encode_image_jpeg(preview, self.options.jpeg_quality)
                    .map(|bytes| Download {
                        filename: filename.to_string(),
                        mime: JPEG_MIME,
                        bytes,
                    })
                    .map_err(SessionError::from)
            }
            _ => Err(ValidationError::NothingToDownload.into()),
        };

        let download = match result {
            Ok(download) => download,
            Err(err) => return Err(self.fail(err)),
        };

        let state = std::mem::replace(&mut self.state, SessionState::Configuring);
        if let SessionState::Previewing { preview, .. } = state {
            self.state = SessionState::Stitched {
                preview,
                download: download.clone(),
            };
        }
        info!(
            "Download ready: {} ({} bytes)",
            download.filename,
            download.bytes.len()
        );
        Ok(download)
    }

    /// Stitch and encode in one step.
    pub fn stitch_and_download(&mut self) -> Result<Download, SessionError> {
        self.stitch()?;
        self.download()
    }

    fn ordered_files(&self) -> impl Iterator<Item = (usize, &UploadedFile)> + '_ {
        self.order
            .iter()
            .filter_map(move |&i| self.files.get(i).map(|file| (i, file)))
    }

    /// Bordered thumbnails of every decodable file, in current order.
    pub fn thumbnails(&self) -> Result<Vec<Thumbnail>, SessionError> {
        let mut thumbnails = Vec::with_capacity(self.files.len());
        for (index, file) in self.ordered_files() {
            let Ok(thumb) = file.thumbnail(self.options.thumbnail_size) else {
                continue;
            };
            thumbnails.push(Thumbnail {
                index,
                caption: file.name().to_string(),
                image: add_border(thumb, self.config.border_width)?,
            });
        }
        Ok(thumbnails)
    }

    /// Recompute every derived display value.
    pub fn render(&self) -> SessionView {
        let border = self.config.border_width.saturating_mul(2);
        let mut thumbnails = Vec::new();
        let mut file_errors = Vec::new();

        for (index, file) in self.ordered_files() {
            match file.thumbnail(self.options.thumbnail_size) {
                Ok(thumb) => thumbnails.push(ThumbnailView {
                    index,
                    caption: file.name().to_string(),
                    width: thumb.width.saturating_add(border),
                    height: thumb.height.saturating_add(border),
                }),
                Err(err) => file_errors.push(FileErrorView {
                    index,
                    name: file.name().to_string(),
                    message: err.to_string(),
                }),
            }
        }

        let (target_resolution, estimate_error) = match self.estimate() {
            Ok(size) => (size, None),
            Err(err) => (None, Some(err.to_string())),
        };
        let target_resolution_text = target_resolution
            .map(|(w, h)| format!("Current target resolution: {} x {} pixels", w, h));

        let filename = self.full_filename();
        let filename_error = validate_filename(&filename)
            .err()
            .map(|err| err.to_string());

        let message = match &self.state {
            SessionState::Error { message } => Some(message.clone()),
            _ => None,
        };

        SessionView {
            phase: self.phase(),
            thumbnails,
            order_text: self.order_text.clone(),
            order: self.order.clone(),
            config: self.config.clone(),
            target_resolution,
            target_resolution_text,
            estimate_error,
            filename,
            filename_error,
            file_errors,
            message,
            preview_size: self.preview().map(DecodedImage::dimensions),
        }
    }

    /// Output size of a stitch with the current inputs, or `None` without
    /// uploads.
    pub fn estimate(&self) -> Result<Option<(u32, u32)>, SessionError> {
        if self.files.is_empty() {
            return Ok(None);
        }
        let sizes = self
            .ordered_files()
            .map(|(_, file)| {
                file.dimensions().map_err(|source| SessionError::Decode {
                    name: file.name().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let layout = plan_layout(&sizes, &self.config)?;
        Ok(Some(layout.output))
    }
}
