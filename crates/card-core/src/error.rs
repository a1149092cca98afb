//! Error taxonomy for the card editor core.
//!
//! None of these are fatal: the editor session turns every error into a
//! user-visible notification and leaves the scene untouched.

use thiserror::Error;

/// Failure while turning an uploaded file into something the scene can use.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    #[error("Invalid font file format. Please upload TTF, OTF, WOFF, or WOFF2 files.")]
    UnsupportedFont(String),
    #[error("Unsupported image file: {0}")]
    UnsupportedImage(String),
    #[error("Font loading failed, please ensure the file format is correct")]
    FontLoad,
    #[error("Could not read file: {0}")]
    Read(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CardError {
    #[error("element index {index} out of range (scene has {len} elements)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid color `{0}`")]
    InvalidColor(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("persistence failed: {0}")]
    Persistence(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("codec error: {0}")]
    Codec(String),
}

pub type Result<T, E = CardError> = std::result::Result<T, E>;

impl CardError {
    pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(CardError::IndexOutOfRange { index, len })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_errors_convert() {
        let err: CardError = AssetError::FontLoad.into();
        assert_eq!(
            err.to_string(),
            "Font loading failed, please ensure the file format is correct"
        );
    }

    #[test]
    fn index_check() {
        assert!(CardError::check_index(2, 3).is_ok());
        assert_eq!(
            CardError::check_index(3, 3),
            Err(CardError::IndexOutOfRange { index: 3, len: 3 })
        );
    }
}
