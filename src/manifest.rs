//! Manifest assembly: stable ordering plus serialization to `media.json`.
//!
//! The manifest is the sole persisted state of the pipeline. It is rebuilt
//! and overwritten wholesale every run; the incremental behavior lives
//! entirely in the transforms' skip-if-exists checks.

use crate::types::MediaItem;
use std::io;
use std::path::{Path, PathBuf};

/// Manifest filename at the top of the output root.
pub const MANIFEST_FILENAME: &str = "media.json";

/// Sort entries by date descending. A missing date sorts as the empty
/// string — the smallest key — so dateless items land last. The sort is
/// stable, so equal dates keep their discovery order.
pub fn sort_items(items: &mut [MediaItem]) {
    items.sort_by(|a, b| date_key(b).cmp(date_key(a)));
}

fn date_key(item: &MediaItem) -> &str {
    item.date.as_deref().unwrap_or("")
}

/// Sort, serialize (2-space indent, non-ASCII unescaped) and overwrite
/// `<output-root>/media.json`. Returns the manifest path.
pub fn write_manifest(mut items: Vec<MediaItem>, output_root: &Path) -> io::Result<PathBuf> {
    sort_items(&mut items);
    let path = output_root.join(MANIFEST_FILENAME);
    let mut json = serde_json::to_string_pretty(&items)?;
    json.push('\n');
    std::fs::write(&path, json)?;
    Ok(path)
}
