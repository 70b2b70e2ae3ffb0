//! Manifest validation and path resolution.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use llmstxt_shared::{LlmsTxtError, Manifest, Result};

/// Presence of a single manifest entry on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryStatus {
    pub path: String,
    pub present: bool,
}

/// Reject entries that could not produce exactly one section under the root.
///
/// Entries must be non-empty, relative, free of `..`, and unique.
pub fn validate_manifest(manifest: &Manifest) -> Result<()> {
    let mut seen = HashSet::with_capacity(manifest.len());

    for (index, entry) in manifest.iter().enumerate() {
        if entry.trim().is_empty() {
            return Err(LlmsTxtError::validation(format!(
                "manifest entry #{} is empty",
                index + 1
            )));
        }

        let path = Path::new(entry);
        let mut normalized = PathBuf::new();
        for component in path.components() {
            match component {
                Component::RootDir | Component::Prefix(_) => {
                    return Err(LlmsTxtError::validation(format!(
                        "manifest entry '{entry}' must be relative to the project root"
                    )));
                }
                Component::ParentDir => {
                    return Err(LlmsTxtError::validation(format!(
                        "manifest entry '{entry}' must not contain '..'"
                    )));
                }
                Component::CurDir => {}
                Component::Normal(part) => normalized.push(part),
            }
        }

        // `a.md`, `./a.md` and `.//a.md` name the same file.
        if !seen.insert(normalized) {
            return Err(LlmsTxtError::validation(format!(
                "duplicate manifest entry '{entry}'"
            )));
        }
    }

    debug!(entries = manifest.len(), "manifest validated");
    Ok(())
}

/// Resolve a manifest entry against the project root.
pub fn resolve(root: &Path, entry: &str) -> PathBuf {
    root.join(entry)
}

/// Report which manifest entries exist as files, without reading them.
pub fn inspect(root: &Path, manifest: &Manifest) -> Vec<EntryStatus> {
    manifest
        .iter()
        .map(|entry| EntryStatus {
            path: entry.clone(),
            present: resolve(root, entry).is_file(),
        })
        .collect()
}
