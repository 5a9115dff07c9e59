//! Data model for one scrape run: the fetched page and what the pipeline produced.

use std::path::PathBuf;

/// A fetched page: source URL and raw body bytes.
#[derive(Debug, Clone)]
pub struct Page {
    /// Absolute URL the page was fetched from. Also the base for resolving relative image sources.
    pub url: String,
    pub body: Vec<u8>,
}

impl Page {
    /// Body decoded as UTF-8. Invalid sequences are replaced rather than rejected.
    pub fn html(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Image counts for one page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageStats {
    /// `<img>` elements with a source attribute.
    pub found: usize,
    pub downloaded: usize,
    pub failed: usize,
}

/// Result of a successful page run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    pub url: String,
    /// Path of the written `.mdx` file.
    pub output_path: PathBuf,
    pub images: ImageStats,
}

/// Per-URL tally for a multi-URL run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: Vec<PageOutcome>,
    /// URLs whose pipeline aborted, with the logged reason.
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_html_replaces_invalid_utf8() {
        let page = Page {
            url: "https://docs.example.com/".to_string(),
            body: vec![b'<', b'p', b'>', 0xff, b'<', b'/', b'p', b'>'],
        };
        assert_eq!(page.html(), "<p>\u{fffd}</p>");
    }

    #[test]
    fn batch_total_counts_both_sides() {
        let summary = BatchSummary {
            succeeded: vec![PageOutcome {
                url: "https://docs.example.com/a/".into(),
                output_path: PathBuf::from("out/a.mdx"),
                images: ImageStats::default(),
            }],
            failed: vec![("https://docs.example.com/b/".into(), "HTTP 404".into())],
        };
        assert_eq!(summary.total(), 2);
    }
}
