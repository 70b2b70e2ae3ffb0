//! Shared types, error model, and configuration for llmstxt.
//!
//! This crate is the foundation depended on by the other llmstxt crates.
//! It provides:
//! - [`LlmsTxtError`]: the unified error type
//! - Domain types ([`Manifest`], [`DocumentHeader`], [`Section`], [`GenerateReport`])
//! - Configuration ([`AppConfig`], config loading, the built-in manifest)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CONFIG_FILE_NAME, DEFAULT_MANIFEST, DEFAULT_OUTPUT, ManifestConfig,
    config_file_path, default_header, default_manifest, init_config, load_config,
    load_config_from, validate_header,
};
pub use error::{LlmsTxtError, Result};
pub use types::{
    DocumentHeader, GenerateReport, Manifest, Section, SkipReason, SkippedEntry, TocMode,
};
