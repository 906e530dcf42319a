//! Content classification: sniffed MIME type -> canonical extension per category.
//!
//! The table is two-level (category -> MIME -> extension) and static. A body is
//! accepted for a category only if its sniffed MIME type appears under that
//! category; anything else is unrecognized for that request.

mod sniff;

pub use sniff::{sniff_mime, UNKNOWN_MIME};

use std::fmt;
use std::str::FromStr;

use crate::error::MediaError;

/// Media kind requested by the document driver for a given URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Img,
    Video,
    Audio,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Img, Category::Video, Category::Audio];

    /// Key used on the command line and in the driver (`img`, `video`, `audio`).
    pub fn key(self) -> &'static str {
        match self {
            Category::Img => "img",
            Category::Video => "video",
            Category::Audio => "audio",
        }
    }

    /// Accepted MIME types and their canonical extensions.
    pub fn accepted(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Category::Img => IMG_TYPES,
            Category::Video => VIDEO_TYPES,
            Category::Audio => AUDIO_TYPES,
        }
    }

    /// Canonical extension for `mime` under this category, if accepted.
    pub fn extension_for(self, mime: &str) -> Option<&'static str> {
        self.accepted()
            .iter()
            .find(|(m, _)| *m == mime)
            .map(|(_, ext)| *ext)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| MediaError::UnknownCategory(s.to_string()))
    }
}

const IMG_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/gif", "gif"),
    ("image/webp", "webp"),
    ("image/avif", "avif"),
];

const VIDEO_TYPES: &[(&str, &str)] = &[("video/mp4", "mp4"), ("video/webm", "webm")];

const AUDIO_TYPES: &[(&str, &str)] = &[
    ("audio/ogg", "ogg"),
    ("audio/flac", "flac"),
    ("audio/mpeg", "mp3"),
];

/// Outcome of classifying a body for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Accepted; carries the sniffed MIME type and its canonical extension.
    Accepted {
        mime: &'static str,
        extension: &'static str,
    },
    /// Not acceptable for the category. `mime` is what was sniffed, if anything.
    Unrecognized { mime: Option<&'static str> },
}

impl Classification {
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Classification::Accepted { extension, .. } => Some(*extension),
            Classification::Unrecognized { .. } => None,
        }
    }
}

/// Classify `content` for `category`. Empty content is always unrecognized.
pub fn classify(category: Category, content: &[u8]) -> Classification {
    let mime = sniff_mime(content);
    match mime.and_then(|m| category.extension_for(m).map(|ext| (m, ext))) {
        Some((mime, extension)) => Classification::Accepted { mime, extension },
        None => Classification::Unrecognized { mime },
    }
}

/// Like [`classify`], but takes the category by key; unknown keys are unrecognized.
pub fn classify_key(category: &str, content: &[u8]) -> Classification {
    match category.parse::<Category>() {
        Ok(c) => classify(c, content),
        Err(_) => Classification::Unrecognized {
            mime: sniff_mime(content),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";
    const MP4: &[u8] = b"\x00\x00\x00\x18ftypisom\x00\x00\x02\x00";
    const FLAC: &[u8] = b"fLaC\x00\x00\x00\x22";

    #[test]
    fn category_parse_and_display() {
        assert_eq!("img".parse::<Category>().unwrap(), Category::Img);
        assert_eq!("video".parse::<Category>().unwrap(), Category::Video);
        assert_eq!("audio".parse::<Category>().unwrap(), Category::Audio);
        assert_eq!(Category::Audio.to_string(), "audio");
        assert!(matches!(
            "image".parse::<Category>(),
            Err(MediaError::UnknownCategory(k)) if k == "image"
        ));
    }

    #[test]
    fn table_extensions() {
        assert_eq!(Category::Img.extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(Category::Img.extension_for("image/avif"), Some("avif"));
        assert_eq!(Category::Video.extension_for("video/webm"), Some("webm"));
        assert_eq!(Category::Audio.extension_for("audio/mpeg"), Some("mp3"));
        assert_eq!(Category::Img.extension_for("video/mp4"), None);
        assert_eq!(Category::Audio.extension_for("audio/x-wav"), None);
    }

    #[test]
    fn classify_accepts_matching_category() {
        assert_eq!(
            classify(Category::Img, PNG),
            Classification::Accepted {
                mime: "image/png",
                extension: "png"
            }
        );
        assert_eq!(classify(Category::Video, MP4).extension(), Some("mp4"));
        assert_eq!(classify(Category::Audio, FLAC).extension(), Some("flac"));
    }

    #[test]
    fn classify_rejects_category_mismatch() {
        assert_eq!(
            classify(Category::Img, MP4),
            Classification::Unrecognized {
                mime: Some("video/mp4")
            }
        );
        assert_eq!(classify(Category::Video, PNG).extension(), None);
    }

    #[test]
    fn non_mp4_iso_brands_are_not_stored_as_mp4() {
        let three_gp = b"\x00\x00\x00\x18ftyp3gp5\x00\x00\x02\x00";
        let cr3 = b"\x00\x00\x00\x18ftypcrx \x00\x00\x00\x01";
        let unknown = b"\x00\x00\x00\x18ftypzzzz\x00\x00\x00\x00";
        assert_eq!(
            classify(Category::Video, three_gp),
            Classification::Unrecognized {
                mime: Some("video/3gpp")
            }
        );
        assert_eq!(classify(Category::Video, cr3).extension(), None);
        assert_eq!(classify(Category::Img, cr3).extension(), None);
        assert_eq!(
            classify(Category::Video, unknown),
            Classification::Unrecognized { mime: None }
        );
    }

    #[test]
    fn classify_empty_is_unrecognized() {
        for c in Category::ALL {
            assert_eq!(classify(c, b""), Classification::Unrecognized { mime: None });
        }
    }

    #[test]
    fn classify_html_error_page_is_unrecognized() {
        let page = b"<!doctype html><title>Not Found</title>";
        assert_eq!(
            classify(Category::Img, page),
            Classification::Unrecognized {
                mime: Some("text/html")
            }
        );
    }

    #[test]
    fn classify_key_unknown_category() {
        assert_eq!(classify_key("img", PNG).extension(), Some("png"));
        assert_eq!(
            classify_key("picture", PNG),
            Classification::Unrecognized {
                mime: Some("image/png")
            }
        );
    }
}
