//! Manifest validation, rendering, and generation for llmstxt.
//!
//! This crate turns an ordered manifest of markdown files into a single
//! `llms.txt` reference document (see [`generator::generate`]).

pub mod generator;
pub mod manifest;
pub mod render;
