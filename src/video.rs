//! Video transform: ffmpeg re-encode plus poster frame extraction.
//!
//! Invocations are built as explicit argument lists — never an interpolated
//! shell string — so paths with spaces or quotes survive intact. The poster
//! frame is pulled from the *re-encoded* output rather than the source, so it
//! always reflects what the browser will actually play.
//!
//! Each call runs at most one ffmpeg process at a time and blocks until it
//! finishes; there is no timeout.

use crate::config::VideoSettings;
use crate::transform::{Outcome, TransformError};
use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Timestamp the poster frame is taken from.
const POSTER_OFFSET: &str = "00:00:01.000";

/// Re-encode a video and extract its poster frame.
///
/// Order matters: a missing tool is reported even when the outputs already
/// exist, then the existence-based skip applies, then the two ffmpeg steps
/// run. A non-zero exit at either step fails the whole transform and the
/// caller must not trust any outputs it left behind.
pub fn transform_video(
    source: &Path,
    out_video: &Path,
    out_poster: &Path,
    settings: &VideoSettings,
    ffmpeg: Option<&Path>,
    force: bool,
) -> Result<Outcome, TransformError> {
    let ffmpeg = ffmpeg.ok_or(TransformError::ToolMissing)?;

    if !force && out_video.exists() && out_poster.exists() {
        return Ok(Outcome::UpToDate);
    }

    for out in [out_video, out_poster] {
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
    }

    run_ffmpeg(ffmpeg, encode_args(source, out_video, settings), source)?;
    run_ffmpeg(ffmpeg, poster_args(out_video, out_poster), source)?;

    Ok(Outcome::Written)
}

/// Arguments for the re-encode step: bound width (even-height auto-scale),
/// mobile-safe 4:2:0 pixel format, x264 at the configured CRF/preset, AAC
/// stereo audio, and faststart so playback begins before the full download.
fn encode_args(source: &Path, out_video: &Path, settings: &VideoSettings) -> Vec<OsString> {
    let filter = format!(
        "scale='min({},iw)':-2,format=yuv420p",
        settings.max_width
    );
    let crf = settings.crf.to_string();
    let mut args: Vec<OsString> = vec!["-y".into(), "-nostdin".into(), "-i".into()];
    args.push(source.into());
    for s in [
        "-vf",
        filter.as_str(),
        "-c:v",
        "libx264",
        "-preset",
        settings.preset.as_str(),
        "-crf",
        crf.as_str(),
        "-c:a",
        "aac",
        "-b:a",
        settings.audio_bitrate.as_str(),
        "-ac",
        "2",
        "-movflags",
        "+faststart",
    ] {
        args.push(s.into());
    }
    args.push(out_video.into());
    args
}

/// Arguments for the poster step: seek 1s into the re-encoded output and
/// write a single frame.
fn poster_args(encoded: &Path, out_poster: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into(), "-nostdin".into(), "-i".into()];
    args.push(encoded.into());
    for s in ["-ss", POSTER_OFFSET, "-vframes", "1"] {
        args.push(s.into());
    }
    args.push(out_poster.into());
    args
}

/// Run ffmpeg to completion, mapping a non-zero exit to a `Process` error
/// carrying the tail of stderr.
fn run_ffmpeg(ffmpeg: &Path, args: Vec<OsString>, source: &Path) -> Result<(), TransformError> {
    let output = Command::new(ffmpeg).args(&args).output()?;
    if output.status.success() {
        return Ok(());
    }
    Err(TransformError::Process {
        tool: "ffmpeg",
        status: output.status.to_string(),
        path: source.to_path_buf(),
        stderr: stderr_tail(&output.stderr),
    })
}

/// Last few stderr lines, enough to say why ffmpeg bailed without dumping
/// its whole banner into the diagnostics.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(4);
    lines[start..].join(" | ")
}
