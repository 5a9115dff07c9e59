//! docscrape: CLI scraper for documentation pages, outputting MDX with localized images.

pub mod cli;
pub mod config;
pub mod formats;
pub mod logging;
pub mod model;
pub mod scraper;

// Re-exports for CLI and consumers.
pub use formats::{render_markdown, slug_for_url, write_mdx, FormatError};
pub use model::{BatchSummary, ImageStats, Page, PageOutcome};
pub use crate::scraper::{
    extract_content, fetch_page, localize_images, scrape_all, scrape_page, ContentFragment, Fetch,
    FetchError, HttpClient, ImageRef, PageError, ScrapeOptions,
};
