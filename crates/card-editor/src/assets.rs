//! Results of asynchronous file loads.
//!
//! The host reads the file; the session only sees the completed result and
//! applies it in one synchronous step. A failed load never touches the scene.

use card_core::{AssetError, ImageRef};

pub const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "woff", "woff2"];

/// A finished image read, e.g. via `FileReader.readAsDataURL`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub data: ImageRef,
}

impl ImageUpload {
    pub fn validate(self) -> Result<ImageRef, AssetError> {
        let data_url_is_image = self.data.as_str().starts_with("data:image/");
        if self.mime.starts_with("image/") || data_url_is_image {
            Ok(self.data)
        } else {
            Err(AssetError::UnsupportedImage(self.file_name))
        }
    }
}

/// A font file the host has loaded and registered under `family`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontFace {
    pub family: String,
    pub file_name: String,
    pub url: String,
}

fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    Some(ext.to_ascii_lowercase())
}

/// Check a font file name and derive the family it will be registered as
/// (the file name without its extension).
pub fn font_family_for(file_name: &str) -> Result<String, AssetError> {
    match extension(file_name) {
        Some(ext) if FONT_EXTENSIONS.contains(&ext.as_str()) => {
            let stem = file_name.rsplit_once('.').map_or(file_name, |(stem, _)| stem);
            Ok(stem.to_string())
        }
        _ => Err(AssetError::UnsupportedFont(file_name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn font_extensions() {
        assert_eq!(font_family_for("Lobster-Regular.TTF").unwrap(), "Lobster-Regular");
        assert_eq!(font_family_for("my.fancy.woff2").unwrap(), "my.fancy");
        assert_eq!(
            font_family_for("notes.txt"),
            Err(AssetError::UnsupportedFont("notes.txt".to_string()))
        );
        assert!(font_family_for("noext").is_err());
    }

    #[test]
    fn image_mime() {
        let ok = ImageUpload {
            file_name: "cat.png".to_string(),
            mime: "image/png".to_string(),
            data: ImageRef::new("data:image/png;base64,AAAA"),
        };
        assert!(ok.validate().is_ok());

        let bad = ImageUpload {
            file_name: "doc.pdf".to_string(),
            mime: "application/pdf".to_string(),
            data: ImageRef::new("data:application/pdf;base64,AAAA"),
        };
        assert_eq!(
            bad.validate(),
            Err(AssetError::UnsupportedImage("doc.pdf".to_string()))
        );
    }
}
