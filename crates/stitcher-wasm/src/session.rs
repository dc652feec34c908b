//! Session WASM bindings.
//!
//! `JsStitchSession` maps each UI widget onto a setter. Call `view()` after
//! any change to get the rendered state as a plain object.
//!
//! ```typescript
//! const session = new StitchSession({ thumbnail_size: 150 });
//! for (const file of input.files) {
//!   session.add_file(file.name, new Uint8Array(await file.arrayBuffer()));
//! }
//! session.set_order("2,0,1");
//! session.set_scale_percentage(50);
//!
//! const view = session.view();
//! console.log(`${view.target_resolution[0]} x ${view.target_resolution[1]}`);
//!
//! const preview = session.stitch();
//! const download = session.download();
//! saveAs(new Blob([download.bytes()], { type: download.mime }), download.filename);
//! ```

use crate::types::{pad_mode_from_u8, resolution_from_u8, unknown_code, JsDecodedImage};
use stitcher_core::session::{
    Download, FileUpload, SessionEvent, SessionOptions, StitchSession, ValidationError,
};
use stitcher_core::validate::JpegExtension;
use stitcher_core::SessionError;
use wasm_bindgen::prelude::*;

fn to_js(err: SessionError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// A stitched file ready to save.
#[wasm_bindgen(js_name = Download)]
pub struct JsDownload {
    inner: Download,
}

#[wasm_bindgen(js_class = Download)]
impl JsDownload {
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.inner.filename.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime.to_string()
    }

    /// Encoded JPEG bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }
}

/// A bordered thumbnail with its caption.
#[wasm_bindgen(js_name = Thumbnail)]
pub struct JsThumbnail {
    index: usize,
    caption: String,
    image: JsDecodedImage,
}

#[wasm_bindgen(js_class = Thumbnail)]
impl JsThumbnail {
    /// Upload position of the file.
    #[wasm_bindgen(getter)]
    pub fn index(&self) -> usize {
        self.index
    }

    #[wasm_bindgen(getter)]
    pub fn caption(&self) -> String {
        self.caption.clone()
    }

    pub fn image(&self) -> JsDecodedImage {
        self.image.clone()
    }
}

/// Interactive stitching session for JavaScript
#[wasm_bindgen(js_name = StitchSession)]
pub struct JsStitchSession {
    inner: StitchSession,
}

#[wasm_bindgen(js_class = StitchSession)]
impl JsStitchSession {
    /// Create a session. `options` may be omitted or partial; a zero
    /// `thumbnail_size` is rejected.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<JsStitchSession, JsValue> {
        let options = if options.is_undefined() || options.is_null() {
            SessionOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let inner = StitchSession::with_options(options).map_err(to_js)?;
        Ok(Self { inner })
    }

    /// Current phase name: Empty, Configuring, Previewing, Stitched or Error.
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        format!("{:?}", self.inner.phase())
    }

    pub fn add_file(&mut self, name: String, bytes: Vec<u8>) -> Result<(), JsValue> {
        self.handle(SessionEvent::FilesAdded(vec![FileUpload::new(name, bytes)]))
    }

    /// Add several files at once from an array of `{ name, bytes }` objects.
    pub fn add_files(&mut self, files: js_sys::Array) -> Result<(), JsValue> {
        let mut uploads = Vec::with_capacity(files.length() as usize);
        for entry in files.iter() {
            let name = js_sys::Reflect::get(&entry, &JsValue::from_str("name"))?
                .as_string()
                .ok_or_else(|| JsValue::from_str("File entry is missing a name"))?;
            let bytes = js_sys::Reflect::get(&entry, &JsValue::from_str("bytes"))?;
            let bytes = js_sys::Uint8Array::new(&bytes).to_vec();
            uploads.push(FileUpload::new(name, bytes));
        }
        self.handle(SessionEvent::FilesAdded(uploads))
    }

    pub fn remove_file(&mut self, index: usize) -> Result<(), JsValue> {
        self.handle(SessionEvent::FileRemoved(index))
    }

    /// Comma-separated order such as `"2,0,1"`. An invalid order is reported
    /// and the previous one stays in effect.
    pub fn set_order(&mut self, text: String) -> Result<(), JsValue> {
        self.handle(SessionEvent::OrderChanged(text))
    }

    pub fn set_border_width(&mut self, width: u32) -> Result<(), JsValue> {
        self.handle(SessionEvent::BorderWidthChanged(width))
    }

    /// 0 = Pad, 1 = Scale
    pub fn set_pad_mode(&mut self, mode: u8) -> Result<(), JsValue> {
        match pad_mode_from_u8(mode) {
            Some(mode) => self.handle(SessionEvent::PadModeChanged(mode)),
            None => self.reject(unknown_code("pad mode", mode)),
        }
    }

    pub fn set_scale_percentage(&mut self, value: u32) -> Result<(), JsValue> {
        self.handle(SessionEvent::ScalePercentageChanged(value))
    }

    /// 0 = Original, 1 = Screen (72 dpi), 2 = Print (300 dpi)
    pub fn set_resolution_mode(&mut self, mode: u8) -> Result<(), JsValue> {
        match resolution_from_u8(mode) {
            Some(mode) => self.handle(SessionEvent::ResolutionModeChanged(mode)),
            None => self.reject(unknown_code("resolution mode", mode)),
        }
    }

    /// Filename without extension.
    pub fn set_filename(&mut self, base: String) -> Result<(), JsValue> {
        self.handle(SessionEvent::FilenameChanged(base))
    }

    /// `"jpg"` or `"jpeg"`.
    pub fn set_extension(&mut self, extension: &str) -> Result<(), JsValue> {
        match JpegExtension::parse(extension) {
            Some(ext) => self.handle(SessionEvent::ExtensionChanged(ext)),
            None => self.reject(ValidationError::UnknownChoice {
                setting: "extension",
                value: extension.to_string(),
            }),
        }
    }

    /// Stitch and return the preview image.
    pub fn stitch(&mut self) -> Result<JsDecodedImage, JsValue> {
        self.inner.stitch().map_err(to_js)?;
        self.preview()
            .ok_or_else(|| JsValue::from_str("No preview after stitching"))
    }

    /// The current preview, if any.
    pub fn preview(&self) -> Option<JsDecodedImage> {
        self.inner
            .preview()
            .cloned()
            .map(JsDecodedImage::from_decoded)
    }

    pub fn download(&mut self) -> Result<JsDownload, JsValue> {
        self.inner
            .download()
            .map(|inner| JsDownload { inner })
            .map_err(to_js)
    }

    pub fn stitch_and_download(&mut self) -> Result<JsDownload, JsValue> {
        self.inner
            .stitch_and_download()
            .map(|inner| JsDownload { inner })
            .map_err(to_js)
    }

    #[wasm_bindgen(getter)]
    pub fn file_count(&self) -> usize {
        self.inner.files().len()
    }

    /// Rendered state as a plain object (see `SessionView`).
    pub fn view(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.render())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Array of `Thumbnail` in display order.
    pub fn thumbnails(&self) -> Result<js_sys::Array, JsValue> {
        let thumbnails = self.inner.thumbnails().map_err(to_js)?;
        Ok(thumbnails
            .into_iter()
            .map(|t| {
                JsValue::from(JsThumbnail {
                    index: t.index,
                    caption: t.caption,
                    image: JsDecodedImage::from_decoded(t.image),
                })
            })
            .collect())
    }
}

impl JsStitchSession {
    fn handle(&mut self, event: SessionEvent) -> Result<(), JsValue> {
        self.inner.handle(event).map_err(to_js)
    }

    fn reject(&mut self, err: ValidationError) -> Result<(), JsValue> {
        Err(to_js(self.inner.reject_input(err)))
    }
}
