//! Markdown emission: convert an extracted fragment to Markdown and write it as `<slug>.mdx`.

use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of emitted documents.
pub const MDX_EXTENSION: &str = "mdx";
/// Stem used when the URL has no path segment (site root).
pub const DEFAULT_SLUG: &str = "index";

/// Errors from the document writer.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to create output directory: {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File stem for a page URL: the last non-empty path segment, or [DEFAULT_SLUG] for the root.
///
/// `https://x.com/a/b/` gives `b`; `https://x.com/` gives `index`. Query and fragment are ignored.
pub fn slug_for_url(url: &str) -> String {
    let last = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(str::to_string),
        Err(_) => url
            .trim_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };
    last.unwrap_or_else(|| DEFAULT_SLUG.to_string())
}

/// Underline level of a setext heading marker line: 1 for `===`, 2 for `---`.
fn setext_level(line: &str) -> Option<usize> {
    let line = line.trim();
    if line.is_empty() {
        None
    } else if line.chars().all(|c| c == '=') {
        Some(1)
    } else if line.chars().all(|c| c == '-') {
        Some(2)
    } else {
        None
    }
}

/// Rewrite setext `h1`/`h2` headings (text line plus `===`/`---` underline) as `# `/`## ` lines.
/// Fenced code blocks are left alone; a `---` after a blank line stays a rule.
fn setext_to_atx(md: &str) -> String {
    let lines: Vec<&str> = md.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut in_fence = false;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
        }
        let text = line.trim();
        let level = if in_fence || text.is_empty() || text.starts_with('#') {
            None
        } else {
            lines.get(i + 1).and_then(|next| setext_level(next))
        };
        match level {
            Some(level) => {
                out.push(format!("{} {}", "#".repeat(level), text));
                i += 2;
            }
            None => {
                out.push(line.to_string());
                i += 1;
            }
        }
    }
    let mut joined = out.join("\n");
    if md.ends_with('\n') {
        joined.push('\n');
    }
    joined
}

/// Convert an HTML fragment to Markdown with ATX (`#`) headings. Lines are never wrapped at a fixed width.
pub fn render_markdown(html: &str) -> String {
    setext_to_atx(&html2md::parse_html(html))
}

/// Write `markdown` to `output_dir/<slug>.mdx` as UTF-8, creating the directory if needed.
/// An existing file is overwritten.
pub fn write_mdx(output_dir: &Path, slug: &str, markdown: &str) -> Result<PathBuf, FormatError> {
    fs::create_dir_all(output_dir).map_err(|e| FormatError::CreateDir {
        path: output_dir.to_path_buf(),
        source: e,
    })?;
    let path = output_dir.join(format!("{}.{}", slug, MDX_EXTENSION));
    fs::write(&path, markdown.as_bytes()).map_err(|e| FormatError::Io {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}
