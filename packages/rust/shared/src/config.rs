//! Project configuration for llmstxt.
//!
//! Config lives at `<project root>/llms.toml`. When the file is absent the
//! built-in defaults apply, which produce the corpus's standard `llms.txt`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{LlmsTxtError, Result};
use crate::types::{DocumentHeader, Manifest, TocMode};

/// Config file name, resolved against the project root.
pub const CONFIG_FILE_NAME: &str = "llms.toml";

/// Default output location, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "public/llms.txt";

/// Built-in manifest: the corpus documents concatenated into `llms.txt`,
/// in output order.
pub const DEFAULT_MANIFEST: &[&str] = &[
    "README.md",
    "docs/getting-started.md",
    "docs/project-structure.md",
    "docs/dependencies.md",
    "docs/guides/authentication.md",
    "docs/guides/database.md",
    "docs/guides/ui-components.md",
    "docs/guides/forms-and-validation.md",
    "docs/guides/state-management.md",
    "docs/guides/testing.md",
    "docs/guides/deployment.md",
    "rules/nextjs.md",
    "rules/react.md",
    "rules/typescript.md",
    "rules/styling.md",
    "checklists/pre-launch.md",
    "checklists/security.md",
];

// ---------------------------------------------------------------------------
// Config structs (matching llms.toml schema)
// ---------------------------------------------------------------------------

/// Top-level project config, deserialized from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output file, relative to the project root.
    #[serde(default = "default_output")]
    pub output: String,

    /// Table of contents mode.
    #[serde(default)]
    pub toc: TocMode,

    /// `[header]` section.
    #[serde(default)]
    pub header: DocumentHeader,

    /// `[manifest]` section.
    #[serde(default)]
    pub manifest: ManifestConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            toc: TocMode::default(),
            header: DocumentHeader::default(),
            manifest: ManifestConfig::default(),
        }
    }
}

fn default_output() -> String {
    DEFAULT_OUTPUT.into()
}

/// `[manifest]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Ordered document paths.
    #[serde(default = "default_manifest")]
    pub files: Manifest,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            files: default_manifest(),
        }
    }
}

/// The built-in manifest as an owned [`Manifest`].
pub fn default_manifest() -> Manifest {
    Manifest::new(DEFAULT_MANIFEST.iter().copied())
}

/// The built-in document header.
pub fn default_header() -> DocumentHeader {
    DocumentHeader {
        title: "Next.js Development Guide".into(),
        description: "Reference guides, dependency lists, and coding rules for building \
                      Next.js and React applications."
            .into(),
        source: Some("https://github.com/vercel/next.js".into()),
        website: Some("https://nextjs.org".into()),
    }
}

// A partially specified `[header]` keeps the built-in values for the rest.
impl Default for DocumentHeader {
    fn default() -> Self {
        default_header()
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file for a project root.
pub fn config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the project config. Returns defaults if the file does not exist.
pub fn load_config(root: &Path) -> Result<AppConfig> {
    let path = config_file_path(root);

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the project config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LlmsTxtError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        LlmsTxtError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_header(&config.header)?;
    tracing::debug!(?path, entries = config.manifest.files.len(), "loaded config");

    Ok(config)
}

/// Write a default `llms.toml` into the project root.
/// Returns the path to the created file. An existing file is left untouched.
pub fn init_config(root: &Path) -> Result<PathBuf> {
    let path = config_file_path(root);
    if path.exists() {
        return Err(LlmsTxtError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| LlmsTxtError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LlmsTxtError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Check that the header renders to a well-formed block.
pub fn validate_header(header: &DocumentHeader) -> Result<()> {
    if header.title.trim().is_empty() {
        return Err(LlmsTxtError::validation("header title must not be empty"));
    }
    if header.title.contains('\n') || header.description.contains('\n') {
        return Err(LlmsTxtError::validation(
            "header title and description must be single lines",
        ));
    }

    for (label, link) in [("source", &header.source), ("website", &header.website)] {
        if let Some(link) = link {
            Url::parse(link).map_err(|e| {
                LlmsTxtError::validation(format!("header {label} '{link}' is not a valid URL: {e}"))
            })?;
        }
    }

    Ok(())
}
