//! Core domain types for llms.txt generation.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

/// Ordered list of document paths, relative to the project root.
///
/// Order is significant: sections appear in the output in manifest order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest(Vec<String>);

impl Manifest {
    /// Build a manifest from any sequence of path-like strings.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(entries.into_iter().map(Into::into).collect())
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// Header / TOC
// ---------------------------------------------------------------------------

/// Fixed header block written at the top of the generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentHeader {
    /// Document title, rendered as `# <title>`.
    pub title: String,
    /// One-line description, rendered as a `>` quote.
    pub description: String,
    /// Source repository link, rendered as `Source: <url>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Website link, rendered as `Website: <url>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Which entries the table of contents lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TocMode {
    /// Every manifest entry, whether or not it could be read.
    #[default]
    Manifest,
    /// Only entries whose content made it into the body.
    Included,
}

impl std::fmt::Display for TocMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Manifest => f.write_str("manifest"),
            Self::Included => f.write_str("included"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// One included file: its manifest path and verbatim content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub path: String,
    pub content: String,
}

/// Why a manifest entry was left out of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NotFound,
    /// Permission errors, invalid UTF-8, directories, and the like.
    Unreadable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::Unreadable(detail) => write!(f, "unreadable: {detail}"),
        }
    }
}

/// A manifest entry that was skipped during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: SkipReason,
}

// ---------------------------------------------------------------------------
// GenerateReport
// ---------------------------------------------------------------------------

/// Summary of a completed generation run.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    /// Where the document was written.
    pub output_path: PathBuf,
    /// Size of the written document in bytes.
    pub bytes: usize,
    /// Hex-encoded SHA-256 of the written document.
    pub sha256: String,
    /// Manifest entries included in the body, in output order.
    pub included: Vec<String>,
    /// Manifest entries that were skipped.
    pub skipped: Vec<SkippedEntry>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

impl GenerateReport {
    /// Output size in kilobytes (1 KB = 1024 bytes).
    pub fn size_kb(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_preserves_order() {
        let manifest = Manifest::new(["b.md", "a.md", "c.md"]);
        let entries: Vec<&str> = manifest.iter().map(String::as_str).collect();
        assert_eq!(entries, ["b.md", "a.md", "c.md"]);
        assert_eq!(manifest.len(), 3);
        assert!(!manifest.is_empty());
    }

    #[test]
    fn manifest_is_a_plain_list_in_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            files: Manifest,
        }

        let parsed: Wrapper = toml::from_str(r#"files = ["x.md", "docs/y.md"]"#).expect("parse");
        assert_eq!(parsed.files.entries(), ["x.md", "docs/y.md"]);
    }

    #[test]
    fn toc_mode_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            toc: TocMode,
        }

        let parsed: Wrapper = toml::from_str(r#"toc = "included""#).expect("parse");
        assert_eq!(parsed.toc, TocMode::Included);
        assert_eq!(TocMode::default(), TocMode::Manifest);
        assert_eq!(TocMode::Included.to_string(), "included");
    }

    #[test]
    fn size_kb_uses_binary_kilobytes() {
        let report = GenerateReport {
            output_path: PathBuf::from("public/llms.txt"),
            bytes: 2048,
            sha256: String::new(),
            included: vec![],
            skipped: vec![],
            elapsed: Duration::ZERO,
        };
        assert!((report.size_kb() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn skip_reason_display() {
        assert_eq!(SkipReason::NotFound.to_string(), "not found");
        assert_eq!(
            SkipReason::Unreadable("permission denied".into()).to_string(),
            "unreadable: permission denied"
        );
    }
}
