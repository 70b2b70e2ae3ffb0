//! Manifest-driven `llms.txt` generation.
//!
//! Reads each manifest entry in order, skips (with a warning) anything that
//! cannot be read, renders the document, and writes it to the output path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use llmstxt_shared::{
    AppConfig, DocumentHeader, GenerateReport, LlmsTxtError, Manifest, Result, Section,
    SkipReason, SkippedEntry, TocMode,
};

use crate::manifest::{resolve, validate_manifest};
use crate::render::render_document;

/// Inputs for one generation run. Root and manifest are always explicit.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Project root every manifest entry is resolved against.
    pub root: PathBuf,
    /// Ordered documents to concatenate.
    pub manifest: Manifest,
    /// Fixed header block.
    pub header: DocumentHeader,
    /// Output file; relative paths are resolved against `root`.
    pub output: PathBuf,
    /// Which entries the table of contents lists.
    pub toc_mode: TocMode,
}

impl GenerateOptions {
    /// Build options from a loaded config.
    pub fn from_config(root: &Path, config: &AppConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            manifest: config.manifest.files.clone(),
            header: config.header.clone(),
            output: PathBuf::from(&config.output),
            toc_mode: config.toc,
        }
    }

    /// Absolute (or root-relative) location of the output file.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output)
    }
}

/// An in-memory document, rendered but not yet written.
#[derive(Debug, Clone)]
pub struct Generated {
    pub document: String,
    pub sections: Vec<Section>,
    pub skipped: Vec<SkippedEntry>,
}

impl Generated {
    /// Paths of the included sections, in output order.
    pub fn included(&self) -> Vec<String> {
        self.sections.iter().map(|s| s.path.clone()).collect()
    }
}

/// Result of comparing a fresh render with the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    Stale,
    Missing,
}

/// Progress callback for reporting generation status.
pub trait GenerateProgress: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each manifest entry is read (1-based `current`).
    fn file_read(&self, path: &str, current: usize, total: usize);
    /// Called when a manifest entry is skipped.
    fn file_skipped(&self, entry: &SkippedEntry);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl GenerateProgress for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_read(&self, _path: &str, _current: usize, _total: usize) {}
    fn file_skipped(&self, _entry: &SkippedEntry) {}
}

/// Read every manifest entry in order, one at a time.
///
/// Read failures never abort: the entry is logged and returned as skipped.
pub async fn collect_sections(
    root: &Path,
    manifest: &Manifest,
    progress: &dyn GenerateProgress,
) -> (Vec<Section>, Vec<SkippedEntry>) {
    let total = manifest.len();
    let mut sections = Vec::with_capacity(total);
    let mut skipped = Vec::new();

    for (index, entry) in manifest.iter().enumerate() {
        let path = resolve(root, entry);

        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!(path = %entry, bytes = content.len(), "read source file");
                sections.push(Section {
                    path: entry.clone(),
                    content,
                });
            }
            Err(e) => {
                let reason = if e.kind() == ErrorKind::NotFound {
                    warn!("{entry} not found, skipping");
                    SkipReason::NotFound
                } else {
                    warn!(error = %e, "{entry} could not be read, skipping");
                    SkipReason::Unreadable(e.to_string())
                };
                let skipped_entry = SkippedEntry {
                    path: entry.clone(),
                    reason,
                };
                progress.file_skipped(&skipped_entry);
                skipped.push(skipped_entry);
            }
        }

        progress.file_read(entry, index + 1, total);
    }

    (sections, skipped)
}

/// Validate, read, and render without touching the output file.
#[instrument(skip_all, fields(root = %options.root.display(), entries = options.manifest.len()))]
pub async fn build(options: &GenerateOptions, progress: &dyn GenerateProgress) -> Result<Generated> {
    validate_manifest(&options.manifest)?;
    if options.manifest.is_empty() {
        warn!("manifest is empty, output will contain only the header");
    }

    progress.phase("Reading source files");
    let (sections, skipped) = collect_sections(&options.root, &options.manifest, progress).await;

    progress.phase("Rendering");
    let document = match options.toc_mode {
        TocMode::Manifest => render_document(
            &options.header,
            options.manifest.iter().map(String::as_str),
            &sections,
        ),
        TocMode::Included => render_document(
            &options.header,
            sections.iter().map(|s| s.path.as_str()),
            &sections,
        ),
    };

    debug!(
        included = sections.len(),
        skipped = skipped.len(),
        bytes = document.len(),
        "document rendered"
    );

    Ok(Generated {
        document,
        sections,
        skipped,
    })
}

/// Run a full generation: build the document and overwrite the output file.
///
/// A missing output directory is an error; it is not created.
#[instrument(skip_all, fields(output = %options.output.display()))]
pub async fn generate(
    options: &GenerateOptions,
    progress: &dyn GenerateProgress,
) -> Result<GenerateReport> {
    let start = Instant::now();
    let generated = build(options, progress).await?;

    progress.phase("Writing output");
    let output_path = options.output_path();
    write_atomic(&output_path, &generated.document).await?;

    let report = GenerateReport {
        output_path,
        bytes: generated.document.len(),
        sha256: sha256_hex(&generated.document),
        included: generated.included(),
        skipped: generated.skipped,
        elapsed: start.elapsed(),
    };

    debug!(
        path = %report.output_path.display(),
        size_kb = %format!("{:.2}", report.size_kb()),
        included = report.included.len(),
        skipped = report.skipped.len(),
        "generated llms.txt"
    );

    Ok(report)
}

/// Render in memory and compare with the existing output file.
#[instrument(skip_all, fields(output = %options.output.display()))]
pub async fn check(options: &GenerateOptions, progress: &dyn GenerateProgress) -> Result<CheckOutcome> {
    let generated = build(options, progress).await?;
    let output_path = options.output_path();

    progress.phase("Comparing with existing output");
    let outcome = match tokio::fs::read(&output_path).await {
        Ok(existing) if existing == generated.document.as_bytes() => CheckOutcome::UpToDate,
        Ok(_) => CheckOutcome::Stale,
        Err(e) if e.kind() == ErrorKind::NotFound => CheckOutcome::Missing,
        Err(e) => return Err(LlmsTxtError::io(&output_path, e)),
    };

    debug!(path = %output_path.display(), ?outcome, "checked llms.txt");
    Ok(outcome)
}

/// Hex-encoded SHA-256 of a document.
pub fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write to a temp file beside the target, then rename over it.
async fn write_atomic(target: &Path, content: &str) -> Result<()> {
    let file_name = target.file_name().ok_or_else(|| {
        LlmsTxtError::validation(format!("output path {} has no file name", target.display()))
    })?;
    let temp = target.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    if let Err(e) = tokio::fs::write(&temp, content).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(LlmsTxtError::io(target, e));
    }

    if let Err(e) = tokio::fs::rename(&temp, target).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(LlmsTxtError::io(target, e));
    }

    debug!(path = %target.display(), bytes = content.len(), "wrote output");
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
