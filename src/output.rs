//! CLI output formatting.
//!
//! Each piece of user-visible output has a `format_*` function (pure, returns
//! strings, unit-testable) and a thin `print_*` wrapper that writes to
//! stdout/stderr. Per-file diagnostics appear inline during the run; the
//! summary reports only counts and the manifest path — failures are never
//! aggregated into it.

use crate::ingest::IngestReport;
use crate::transform::TransformError;
use crate::types::MediaKind;
use std::path::Path;

/// One diagnostic line for a failed transform, keyed by the source filename.
pub fn format_failure(kind: MediaKind, source: &Path, err: &TransformError) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| source.display().to_string());
    let tag = match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    };
    format!("[{tag}] skip {name}: {err}")
}

/// Diagnostic for a derived id that collides with an earlier file in the
/// same run. The later file is dropped rather than silently overwriting the
/// earlier one's outputs.
pub fn format_duplicate(source: &Path, id: &str) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| source.display().to_string());
    format!("[dup] skip {name}: id {id} already produced this run")
}

/// Completion summary: counts, configured exclusions, manifest location.
pub fn format_summary(report: &IngestReport, excluded: &[&str], manifest_path: &Path) -> Vec<String> {
    let mut lines = vec![format!(
        "Done. Images: {}, Videos: {}",
        report.images, report.videos
    )];
    if !excluded.is_empty() {
        lines.push(format!("Excluded directories: {}", excluded.join(", ")));
    }
    lines.push(format!("Wrote {}", manifest_path.display()));
    lines
}

pub fn print_summary(report: &IngestReport, excluded: &[&str], manifest_path: &Path) {
    for line in format_summary(report, excluded, manifest_path) {
        println!("{line}");
    }
}
