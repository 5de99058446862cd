//! Stable per-item identifiers: slugified filename stem + content digest prefix.
//!
//! The id does double duty. It names every output file, and because it embeds
//! a digest of the source bytes it *is* the incremental-build cache key: a
//! content change produces a new id, hence new output paths, so the
//! skip-if-exists check in the transforms never sees stale outputs for the
//! old content. Renaming a file without touching its bytes changes only the
//! slug half.

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Hex characters of the content digest kept in an id.
const DIGEST_PREFIX_LEN: usize = 8;

/// Slug to fall back on when normalization eats the entire name.
const FALLBACK_SLUG: &str = "item";

/// Normalize a filename stem into a URL-safe slug.
///
/// Lowercase, spaces become hyphens, everything outside `[a-z0-9-_]` is
/// dropped, hyphen runs collapse to one, leading/trailing hyphens are
/// trimmed. An empty result (e.g. an all-emoji name) becomes `"item"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.to_lowercase().chars() {
        let c = if c == ' ' { '-' } else { c };
        match c {
            'a'..='z' | '0'..='9' | '_' => slug.push(c),
            '-' => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }
    let trimmed = slug.trim_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// SHA-256 the full file contents (streamed, 64 KiB buffer) and return the
/// first [`DIGEST_PREFIX_LEN`] hex characters.
pub fn digest_prefix(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();

    let mut buffer = [0u8; 65536];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    let hex = format!("{:x}", hasher.finalize());
    Ok(hex[..DIGEST_PREFIX_LEN].to_string())
}

/// Derive the full id for a source file: `<slug>-<digest-prefix>`.
///
/// Stable across runs for unchanged bytes; two byte-identical files whose
/// names normalize to the same slug derive the same id.
pub fn derive_id(path: &Path) -> io::Result<String> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    Ok(format!("{}-{}", slugify(&stem), digest_prefix(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn slugify_lowercases_and_hyphenates_spaces() {
        assert_eq!(slugify("My Holiday Photo"), "my-holiday-photo");
    }

    #[test]
    fn slugify_drops_disallowed_characters() {
        assert_eq!(slugify("IMG_001 (copy)"), "img_001-copy");
        assert_eq!(slugify("café.photo"), "cafphoto");
    }

    #[test]
    fn slugify_collapses_hyphen_runs() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("a---b"), "a-b");
    }

    #[test]
    fn slugify_trims_edge_hyphens() {
        assert_eq!(slugify("-edge-"), "edge");
        assert_eq!(slugify(" spaced "), "spaced");
    }

    #[test]
    fn slugify_empty_result_falls_back() {
        assert_eq!(slugify(""), "item");
        assert_eq!(slugify("!!!"), "item");
        assert_eq!(slugify("---"), "item");
    }

    #[test]
    fn digest_prefix_is_eight_lowercase_hex() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("f.bin");
        fs::write(&path, b"hello").unwrap();

        let prefix = digest_prefix(&path).unwrap();
        assert_eq!(prefix.len(), 8);
        assert!(prefix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn digest_prefix_stable_across_reads() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("f.bin");
        fs::write(&path, b"same bytes").unwrap();

        assert_eq!(digest_prefix(&path).unwrap(), digest_prefix(&path).unwrap());
    }

    #[test]
    fn identical_bytes_same_digest_regardless_of_name() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.jpg");
        let b = tmp.path().join("b.jpg");
        fs::write(&a, b"pixels").unwrap();
        fs::write(&b, b"pixels").unwrap();

        assert_eq!(digest_prefix(&a).unwrap(), digest_prefix(&b).unwrap());
    }

    #[test]
    fn different_content_changes_id() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("photo.jpg");
        fs::write(&a, b"version one").unwrap();
        let id_one = derive_id(&a).unwrap();
        fs::write(&a, b"version two").unwrap();
        let id_two = derive_id(&a).unwrap();

        assert_ne!(id_one, id_two);
        // The slug half is unchanged
        assert!(id_one.starts_with("photo-"));
        assert!(id_two.starts_with("photo-"));
    }

    #[test]
    fn derive_id_combines_slug_and_digest() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("IMG 001.jpg");
        fs::write(&path, b"data").unwrap();

        let id = derive_id(&path).unwrap();
        let prefix = digest_prefix(&path).unwrap();
        assert_eq!(id, format!("img-001-{prefix}"));
    }
}
