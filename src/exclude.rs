//! Path-segment exclusion filter.
//!
//! Social-media exports bury non-gallery media (chat attachments, story
//! archives) under well-known directory names. The filter drops any file
//! whose path contains one of the configured names as a *full* path segment,
//! compared case-insensitively. Excluded files are invisible to the rest of
//! the pipeline: no outputs, no manifest entry, no log line.

use std::collections::HashSet;
use std::path::Path;

/// Default excluded directory names, targeting message/inbox subtrees of
/// common social-media exports.
pub const DEFAULT_EXCLUDES: &str = "messages,inbox,direct";

/// A configured set of lower-cased directory-name tokens.
#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    tokens: HashSet<String>,
}

impl ExcludeFilter {
    /// Parse a comma-separated token list. Tokens are trimmed and
    /// lower-cased; empty tokens are dropped. An empty list excludes nothing.
    pub fn from_list(list: &str) -> Self {
        let tokens = list
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { tokens }
    }

    /// True when any path component matches a configured token,
    /// case-insensitively.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.tokens.is_empty() {
            return false;
        }
        path.components().any(|c| {
            self.tokens
                .contains(&c.as_os_str().to_string_lossy().to_lowercase())
        })
    }

    /// Configured tokens, sorted for display.
    pub fn tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.tokens.iter().map(String::as_str).collect();
        tokens.sort_unstable();
        tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_full_segment() {
        let filter = ExcludeFilter::from_list("messages,inbox");
        assert!(filter.is_excluded(Path::new("export/messages/photo.jpg")));
        assert!(filter.is_excluded(Path::new("inbox/a/b.png")));
    }

    #[test]
    fn does_not_match_partial_segment() {
        let filter = ExcludeFilter::from_list("inbox");
        assert!(!filter.is_excluded(Path::new("export/inboxes/photo.jpg")));
        assert!(!filter.is_excluded(Path::new("export/my-inbox/photo.jpg")));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let filter = ExcludeFilter::from_list("messages");
        assert!(filter.is_excluded(Path::new("export/Messages/photo.jpg")));
        assert!(filter.is_excluded(Path::new("export/MESSAGES/photo.jpg")));

        let upper = ExcludeFilter::from_list("MESSAGES");
        assert!(upper.is_excluded(Path::new("export/messages/photo.jpg")));
    }

    #[test]
    fn empty_list_excludes_nothing() {
        let filter = ExcludeFilter::from_list("");
        assert!(!filter.is_excluded(Path::new("messages/photo.jpg")));
        assert!(filter.is_empty());

        // Stray commas and whitespace are not tokens
        let filter = ExcludeFilter::from_list(" , ,");
        assert!(filter.is_empty());
    }

    #[test]
    fn tokens_are_trimmed() {
        let filter = ExcludeFilter::from_list(" messages , inbox ");
        assert!(filter.is_excluded(Path::new("messages/a.jpg")));
        assert!(filter.is_excluded(Path::new("inbox/a.jpg")));
        assert_eq!(filter.tokens(), vec!["inbox", "messages"]);
    }

    #[test]
    fn default_excludes_cover_export_subtrees() {
        let filter = ExcludeFilter::from_list(DEFAULT_EXCLUDES);
        for dir in ["messages", "inbox", "direct"] {
            assert!(filter.is_excluded(&Path::new(dir).join("media.mp4")));
        }
        assert!(!filter.is_excluded(Path::new("posts/media.mp4")));
    }
}
