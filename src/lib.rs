//! # Kolibri Ingest
//!
//! Turn a folder of exported media — an Instagram takeout, a camera dump,
//! any directory tree of photos and videos — into web-ready gallery assets
//! plus a `media.json` manifest a static gallery can render.
//!
//! # Pipeline
//!
//! ```text
//! walk input tree → exclusion filter → classify by extension
//!     → derive content-addressed id → transform (WebP / ffmpeg)
//!     → collect entries → sort by date → media.json
//! ```
//!
//! One run owns the whole output: the four asset subdirectories are
//! (re)created, each media file is transcoded to deterministic paths named
//! by its id, and the manifest is rewritten wholesale. Because the id embeds
//! a digest of the source bytes, reruns are incremental for free — existing
//! outputs short-circuit the transforms, and changed content moves to new
//! paths instead of going stale in place.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`ingest`] | Walks the input tree, classifies, transforms, collects manifest entries |
//! | [`identity`] | Stable ids: slugified stem + SHA-256 digest prefix |
//! | [`exclude`] | Path-segment blocklist for non-gallery export subtrees |
//! | [`imaging`] | Image transform: full + thumb lossy WebP variants |
//! | [`video`] | Video transform: ffmpeg H.264 re-encode + poster frame |
//! | [`manifest`] | Sorts entries (date descending) and writes `media.json` |
//! | [`transform`] | Typed per-file outcomes shared by both transforms |
//! | [`config`] | Explicit run configuration, ffmpeg probed once |
//! | [`types`] | `MediaItem` / `MediaKind` and extension classification |
//! | [`output`] | CLI diagnostics and summary formatting |
//!
//! # Design Decisions
//!
//! ## Content-Addressed Output Names
//!
//! Every output file is named `<slug>-<digest8>`. That makes output paths a
//! pure function of source name and bytes: idempotent reruns, cheap
//! incremental builds (existence of the outputs *is* the cache key, no
//! content re-check), and no stale-output hazard when a file's content
//! changes under the same name.
//!
//! ## Failure Isolation
//!
//! Transforms return typed results ([`transform::TransformError`]) instead
//! of printing or aborting. The orchestrator logs one line per failed file
//! and keeps going; only a missing input root is fatal.
//!
//! ## External ffmpeg, Pure-Rust Images
//!
//! Images are decoded, oriented, resized and WebP-encoded in-process.
//! Video transcoding shells out to ffmpeg — probed once on PATH at startup;
//! when absent, videos are skipped with a diagnostic and image processing is
//! unaffected. Invocations are argument lists, never shell strings.

pub mod config;
pub mod exclude;
pub mod identity;
pub mod imaging;
pub mod ingest;
pub mod manifest;
pub mod output;
pub mod transform;
pub mod types;
pub mod video;

#[cfg(test)]
pub(crate) mod test_helpers;
