//! Validation of user-entered text: output filenames and image order.
//!
//! Both validators return a typed error per failure kind so the UI can tell
//! the user exactly what to fix.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Word characters and hyphens only.
static BASE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w-]+$").expect("filename pattern compiles"));

/// Extensions accepted for uploads (compared case-insensitively).
pub const ACCEPTED_UPLOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Extension of the downloaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JpegExtension {
    #[default]
    Jpg,
    Jpeg,
}

impl JpegExtension {
    pub fn as_str(self) -> &'static str {
        match self {
            JpegExtension::Jpg => "jpg",
            JpegExtension::Jpeg => "jpeg",
        }
    }

    /// Exact, case-sensitive match.
    pub fn parse(ext: &str) -> Option<Self> {
        match ext {
            "jpg" => Some(JpegExtension::Jpg),
            "jpeg" => Some(JpegExtension::Jpeg),
            _ => None,
        }
    }
}

/// A filename that passed [`validate_filename`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFilename {
    base: String,
    extension: JpegExtension,
}

impl fmt::Display for OutputFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.base, self.extension.as_str())
    }
}

/// Why a filename was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilenameError {
    #[error("Filename '{0}' has no extension; use .jpg or .jpeg")]
    MissingExtension(String),

    #[error("Invalid filename '{0}': use only letters, digits, underscores and dashes")]
    InvalidBase(String),

    #[error("Invalid extension '.{0}': use .jpg or .jpeg")]
    InvalidExtension(String),
}

/// Why an order string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("'{token}' is not a whole number")]
    InvalidToken { token: String },

    #[error("Expected {expected} indices, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("Index {index} is out of range; use 0 to {max}")]
    OutOfRange { index: i64, max: usize },

    #[error("Index {index} appears more than once")]
    Duplicate { index: usize },
}

/// Validate a full output filename such as `stitched_image.jpg`.
///
/// Splits on the last `.`; the base must be one or more word characters or
/// hyphens and the extension exactly `jpg` or `jpeg`.
pub fn validate_filename(filename: &str) -> Result<OutputFilename, FilenameError> {
    let (base, ext) = filename
        .rsplit_once('.')
        .ok_or_else(|| FilenameError::MissingExtension(filename.to_string()))?;

    if !BASE_PATTERN.is_match(base) {
        return Err(FilenameError::InvalidBase(base.to_string()));
    }

    let extension =
        JpegExtension::parse(ext).ok_or_else(|| FilenameError::InvalidExtension(ext.to_string()))?;

    Ok(OutputFilename {
        base: base.to_string(),
        extension,
    })
}

/// Parse a comma-separated permutation of `0..len`.
///
/// Whitespace around each index is ignored.
pub fn parse_order(text: &str, len: usize) -> Result<Vec<usize>, OrderError> {
    let tokens: Vec<&str> = text.split(',').map(str::trim).collect();

    let mut parsed = Vec::with_capacity(tokens.len());
    for token in &tokens {
        let value: i64 = token.parse().map_err(|_| OrderError::InvalidToken {
            token: token.to_string(),
        })?;
        parsed.push(value);
    }

    if parsed.len() != len {
        return Err(OrderError::WrongLength {
            expected: len,
            actual: parsed.len(),
        });
    }

    let mut seen = vec![false; len];
    let mut order = Vec::with_capacity(len);
    for value in parsed {
        let index = usize::try_from(value)
            .ok()
            .filter(|&i| i < len)
            .ok_or(OrderError::OutOfRange {
                index: value,
                max: len.saturating_sub(1),
            })?;
        if seen[index] {
            return Err(OrderError::Duplicate { index });
        }
        seen[index] = true;
        order.push(index);
    }

    Ok(order)
}

/// The identity order `0,1,...,len-1` as text.
pub fn default_order_text(len: usize) -> String {
    (0..len)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Whether an upload name carries one of [`ACCEPTED_UPLOAD_EXTENSIONS`].
pub fn is_accepted_upload(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| {
            ACCEPTED_UPLOAD_EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}
