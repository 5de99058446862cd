//! Shared types: manifest entries and media classification.
//!
//! [`MediaItem`] is the unit of the manifest — one entry per successfully
//! transcoded source file. Entries are owned by the orchestrator for the
//! duration of a run and never mutated after being appended.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Extensions recognized as raster images (matched case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Extensions recognized as videos (matched case-insensitively).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "m4v", "webm"];

/// What kind of media a source file is, decided purely by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classify a path by its extension. `None` means the file is not media
    /// and is silently ignored by the walker.
    pub fn classify(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

/// One manifest entry.
///
/// `src` and `thumb` are output-root-relative, forward-slash separated
/// regardless of host path conventions — they go straight into URLs.
/// `date` serializes as `null` when the source file had no readable mtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Stable key: slugified filename stem + 8-hex content digest prefix.
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub src: String,
    pub thumb: String,
    /// Local-time ISO-8601 timestamp from the source file's mtime.
    pub date: Option<String>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub hidden: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_image_extensions() {
        for name in ["a.jpg", "a.jpeg", "a.png", "a.webp"] {
            assert_eq!(MediaKind::classify(Path::new(name)), Some(MediaKind::Image));
        }
    }

    #[test]
    fn classify_video_extensions() {
        for name in ["a.mp4", "a.mov", "a.m4v", "a.webm"] {
            assert_eq!(MediaKind::classify(Path::new(name)), Some(MediaKind::Video));
        }
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(
            MediaKind::classify(Path::new("photo.JPG")),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::classify(Path::new("clip.MP4")),
            Some(MediaKind::Video)
        );
    }

    #[test]
    fn unrecognized_extension_is_ignored() {
        assert_eq!(MediaKind::classify(Path::new("clip.mkv")), None);
        assert_eq!(MediaKind::classify(Path::new("notes.txt")), None);
        assert_eq!(MediaKind::classify(Path::new("no-extension")), None);
    }

    #[test]
    fn media_item_serializes_with_type_field() {
        let item = MediaItem {
            id: "img-001-abc12345".to_string(),
            kind: MediaKind::Image,
            src: "assets/media/img/full/img-001-abc12345.webp".to_string(),
            thumb: "assets/media/img/thumbs/img-001-abc12345.webp".to_string(),
            date: None,
            caption: String::new(),
            hidden: false,
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["date"], serde_json::Value::Null);
        assert_eq!(json["caption"], "");
        assert_eq!(json["hidden"], false);
    }

    #[test]
    fn media_item_round_trips() {
        let item = MediaItem {
            id: "clip-deadbeef".to_string(),
            kind: MediaKind::Video,
            src: "assets/media/video/720p/clip-deadbeef.mp4".to_string(),
            thumb: "assets/media/video/posters/clip-deadbeef.jpg".to_string(),
            date: Some("2024-01-01T00:00:00".to_string()),
            caption: "été à Paris".to_string(),
            hidden: false,
        };

        let json = serde_json::to_string(&item).unwrap();
        let back: MediaItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
