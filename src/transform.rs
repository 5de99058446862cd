//! Typed transform outcomes shared by the image and video pipelines.
//!
//! Transforms never print and never panic on bad input: every call collapses
//! to `Result<Outcome, TransformError>` and the orchestrator decides what to
//! log and whether the file earns a manifest entry. One bad file never aborts
//! the run.

use std::path::PathBuf;
use thiserror::Error;

/// How a transform finished when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Outputs were (re)encoded and written.
    Written,
    /// All outputs already existed and `--force` was not set; nothing done.
    UpToDate,
}

/// Why a transform failed. The distinction matters to the orchestrator's
/// diagnostics, not to manifest assembly — any failure means no entry.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("cannot decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("cannot encode {path}: {message}")]
    Encode { path: PathBuf, message: String },

    #[error("ffmpeg not found on PATH; videos are skipped")]
    ToolMissing,

    #[error("{tool} exited with {status} for {path}: {stderr}")]
    Process {
        tool: &'static str,
        status: String,
        path: PathBuf,
        stderr: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
