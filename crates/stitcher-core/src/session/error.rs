//! Session error taxonomy.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::stitch::StitchError;
use crate::validate::{FilenameError, OrderError};

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Filename(#[from] FilenameError),

    #[error("Invalid image order: {0}")]
    Order(#[from] OrderError),

    #[error("Upload at least one image first")]
    NoFiles,

    #[error("'{name}' is not a supported image type (jpg, jpeg, png, gif)")]
    UnsupportedUpload { name: String },

    #[error("No uploaded file at position {index}")]
    NoSuchFile { index: usize },

    #[error("Scale percentage must be between {min} and {max}, got {value}")]
    ScaleOutOfRange { value: u32, min: u32, max: u32 },

    #[error("Nothing to download yet; stitch the images first")]
    NothingToDownload,

    /// A widget sent a value outside its list of choices.
    #[error("Unknown {setting} '{value}'")]
    UnknownChoice { setting: &'static str, value: String },

    #[error("Thumbnail size must be at least 1 pixel")]
    ZeroThumbnailSize,
}

/// Anything that can go wrong while handling a session event or action.
///
/// None of these end the session: the message is shown and the user can
/// correct the input and retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not read '{name}': {source}")]
    Decode { name: String, source: DecodeError },

    #[error("Stitching failed: {0}")]
    Computation(#[from] StitchError),

    #[error("Could not create the download: {0}")]
    Encode(#[from] EncodeError),
}

impl From<FilenameError> for SessionError {
    fn from(err: FilenameError) -> Self {
        SessionError::Validation(err.into())
    }
}

impl From<OrderError> for SessionError {
    fn from(err: OrderError) -> Self {
        SessionError::Validation(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages_are_user_facing() {
        let err: SessionError = OrderError::Duplicate { index: 0 }.into();
        assert_eq!(
            err.to_string(),
            "Invalid image order: Index 0 appears more than once"
        );

        let err: SessionError = FilenameError::InvalidExtension("png".into()).into();
        assert_eq!(err.to_string(), "Invalid extension '.png': use .jpg or .jpeg");
    }

    #[test]
    fn test_unknown_choice_message() {
        let err: SessionError = ValidationError::UnknownChoice {
            setting: "pad mode",
            value: "7".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown pad mode '7'");
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let err = SessionError::Decode {
            name: "a.gif".into(),
            source: DecodeError::InvalidFormat,
        };
        assert!(err.to_string().starts_with("Could not read 'a.gif'"));
        assert!(err.source().is_some());
    }
}
