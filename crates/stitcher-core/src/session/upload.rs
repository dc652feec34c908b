//! One uploaded file with lazily decoded, cached derivatives.

use once_cell::unsync::OnceCell;

use crate::decode::{decode_image, generate_thumbnail, DecodeError, DecodedImage};

/// An uploaded file as received from the browser.
///
/// Decoding and thumbnailing run at most once per file, on first use.
/// Failures are cached too, so a broken file is reported on every render
/// without being decoded again.
#[derive(Debug)]
pub struct UploadedFile {
    name: String,
    bytes: Vec<u8>,
    decoded: OnceCell<Result<DecodedImage, DecodeError>>,
    thumbnail: OnceCell<Result<DecodedImage, DecodeError>>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            decoded: OnceCell::new(),
            thumbnail: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full-resolution RGB image.
    pub fn decoded(&self) -> Result<&DecodedImage, DecodeError> {
        self.decoded
            .get_or_init(|| decode_image(&self.bytes))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Decoded `(width, height)`.
    pub fn dimensions(&self) -> Result<(u32, u32), DecodeError> {
        self.decoded().map(DecodedImage::dimensions)
    }

    /// Thumbnail fitting within `size x size`.
    ///
    /// `size` is fixed per session, so the first call decides the cached size.
    pub fn thumbnail(&self, size: u32) -> Result<&DecodedImage, DecodeError> {
        self.thumbnail
            .get_or_init(|| {
                self.decoded()
                    .and_then(|image| generate_thumbnail(image, size))
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}
