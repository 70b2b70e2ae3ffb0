//! Plain-text rendering of the `llms.txt` document.
//!
//! Layout:
//! ```text
//! # <title>
//!
//! > <description>
//!
//! Source: <url>
//! Website: <url>
//!
//! ## Table of Contents
//!
//! - <entry>
//! - <entry>
//!
//! ================================================================================
//! ## <relative-path>
//! ================================================================================
//!
//! <verbatim content>
//! ```
//!
//! Rendering is pure: the same inputs always produce the same bytes.

use llmstxt_shared::{DocumentHeader, Section};

/// Width of the `=` rule framing each section heading.
pub const RULE_WIDTH: usize = 80;

/// The `=` rule line, without a newline.
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Render the title, description, and link lines.
pub fn render_header(header: &DocumentHeader) -> String {
    let mut out = format!("# {}\n\n> {}\n\n", header.title, header.description);

    let mut has_links = false;
    if let Some(source) = &header.source {
        out.push_str(&format!("Source: {source}\n"));
        has_links = true;
    }
    if let Some(website) = &header.website {
        out.push_str(&format!("Website: {website}\n"));
        has_links = true;
    }
    if has_links {
        out.push('\n');
    }

    out
}

/// Render the `## Table of Contents` block, one bullet per entry.
pub fn render_toc<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::from("## Table of Contents\n\n");
    for entry in entries {
        out.push_str("- ");
        out.push_str(entry);
        out.push('\n');
    }
    out
}

/// Render one body section: rule, heading, rule, blank line, content.
pub fn render_section(section: &Section) -> String {
    let rule = rule();
    format!(
        "{rule}\n## {path}\n{rule}\n\n{content}",
        path = section.path,
        content = section.content
    )
}

/// Assemble the full document from its header, TOC entries, and sections.
///
/// Each section is preceded by exactly one blank line and the document
/// always ends with a newline. Section content is copied verbatim.
pub fn render_document<'a, I>(header: &DocumentHeader, toc: I, sections: &[Section]) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut doc = render_header(header);
    doc.push_str(&render_toc(toc));

    for section in sections {
        ensure_trailing_newline(&mut doc);
        doc.push('\n');
        doc.push_str(&render_section(section));
    }

    ensure_trailing_newline(&mut doc);
    doc
}

fn ensure_trailing_newline(doc: &mut String) {
    if !doc.ends_with('\n') {
        doc.push('\n');
    }
}
