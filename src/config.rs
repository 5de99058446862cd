//! Run configuration.
//!
//! Everything that used to be ambient — working directories, the one-shot
//! ffmpeg availability probe, encoder knobs — lives in an explicit
//! [`IngestConfig`] built once in `main` and passed into the orchestrator.
//! Transforms take the piece they need; nothing re-probes the environment
//! mid-run.

use crate::exclude::ExcludeFilter;
use std::path::PathBuf;

/// Image encoder settings.
#[derive(Debug, Clone)]
pub struct ImageSettings {
    /// Maximum width of the full variant; wider sources are downscaled.
    pub max_full_width: u32,
    /// Maximum width of the thumb variant, computed from the original image.
    pub max_thumb_width: u32,
    /// Lossy WebP quality (0-100).
    pub quality: f32,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_full_width: 1280,
            max_thumb_width: 400,
            quality: 82.0,
        }
    }
}

/// Video encoder settings, passed to ffmpeg verbatim.
#[derive(Debug, Clone)]
pub struct VideoSettings {
    /// Maximum output width; height scales to keep aspect, forced even.
    pub max_width: u32,
    /// x264 constant rate factor.
    pub crf: u32,
    /// x264 preset.
    pub preset: String,
    /// AAC bitrate, e.g. "160k".
    pub audio_bitrate: String,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            max_width: 1280,
            crf: 23,
            preset: "slow".to_string(),
            audio_bitrate: "160k".to_string(),
        }
    }
}

/// Full configuration for one ingest run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    pub excludes: ExcludeFilter,
    /// Re-encode even when outputs already exist.
    pub force: bool,
    /// Worker threads for transforms. 1 = strictly sequential.
    pub threads: usize,
    pub image: ImageSettings,
    pub video: VideoSettings,
    /// Resolved ffmpeg path, probed once at startup. `None` disables all
    /// video processing without affecting images.
    pub ffmpeg: Option<PathBuf>,
}

impl IngestConfig {
    pub fn new(input_root: PathBuf, output_root: PathBuf) -> Self {
        Self {
            input_root,
            output_root,
            excludes: ExcludeFilter::default(),
            force: false,
            threads: 1,
            image: ImageSettings::default(),
            video: VideoSettings::default(),
            ffmpeg: None,
        }
    }

    /// Locate ffmpeg on PATH. Called once from `main`.
    pub fn probe_ffmpeg() -> Option<PathBuf> {
        which::which("ffmpeg").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn image_defaults_match_reference_pipeline() {
        let s = ImageSettings::default();
        assert_eq!(s.max_full_width, 1280);
        assert_eq!(s.max_thumb_width, 400);
        assert_eq!(s.quality, 82.0);
    }

    #[test]
    fn video_defaults_match_reference_pipeline() {
        let s = VideoSettings::default();
        assert_eq!(s.max_width, 1280);
        assert_eq!(s.crf, 23);
        assert_eq!(s.preset, "slow");
        assert_eq!(s.audio_bitrate, "160k");
    }

    #[test]
    fn new_config_is_sequential_and_lenient() {
        let config = IngestConfig::new(PathBuf::from("in"), PathBuf::from("out"));
        assert_eq!(config.threads, 1);
        assert!(!config.force);
        assert!(config.ffmpeg.is_none());
        assert!(!config.excludes.is_excluded(Path::new("messages/a.jpg")));
    }
}
