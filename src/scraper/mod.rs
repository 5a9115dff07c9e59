//! Page pipeline: fetch, extract, localize images, emit Markdown. One URL runs end to end before the next.

mod client;
mod error;
mod extract;
mod images;

pub use client::{Fetch, HttpClient};
pub use error::{FetchError, PageError};
pub use extract::{extract_content, ContentFragment, ImageRef, DEFAULT_CONTENT_CLASS};
pub use images::{image_file_name, localize_images, resolve_image_url};

use crate::formats::{render_markdown, slug_for_url, write_mdx, FormatError};
use crate::model::{BatchSummary, ImageStats, Page, PageOutcome};
use std::path::PathBuf;
use tracing::{error, info, warn};

pub const DEFAULT_OUTPUT_DIR: &str = "output_mdx";
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// Settings for a scrape run. `Default` gives the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Base directory for all written files. Default `output_mdx`.
    pub output_dir: PathBuf,
    /// Image directory, relative to `output_dir`. Default `images`.
    pub images_dir: PathBuf,
    /// Class of the `div` holding the article body. Default `theme-doc-markdown`.
    pub content_class: String,
    /// Download images and rewrite their sources. When false, image references are left as-is.
    pub localize_images: bool,
    /// Show a progress bar while downloading images.
    pub progress: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            content_class: DEFAULT_CONTENT_CLASS.to_string(),
            localize_images: true,
            progress: false,
        }
    }
}

impl From<FormatError> for PageError {
    fn from(e: FormatError) -> Self {
        match e {
            FormatError::CreateDir { path, source } | FormatError::Io { path, source } => {
                PageError::Filesystem { path, source }
            }
        }
    }
}

/// Fetch `url` as a [Page].
pub fn fetch_page<F: Fetch + ?Sized>(fetcher: &mut F, url: &str) -> Result<Page, PageError> {
    info!("Fetching {}...", url);
    let body = fetcher.fetch(url)?;
    Ok(Page {
        url: url.to_string(),
        body,
    })
}

/// Run the whole pipeline for one URL.
///
/// Nothing is written when the fetch fails or the content container is missing. Images
/// (when enabled) are written before the `.mdx`, so the document is always the last file of a page.
pub fn scrape_page<F: Fetch + ?Sized>(
    fetcher: &mut F,
    url: &str,
    options: &ScrapeOptions,
) -> Result<PageOutcome, PageError> {
    let page = fetch_page(fetcher, url)?;

    let mut fragment = extract_content(&page.html(), &options.content_class)?.ok_or_else(|| {
        PageError::ContentNotFound {
            url: page.url.clone(),
            class: options.content_class.clone(),
        }
    })?;

    let images = if options.localize_images {
        localize_images(
            fetcher,
            &page.url,
            &mut fragment,
            &options.output_dir,
            &options.images_dir,
            options.progress,
        )?
    } else {
        ImageStats::default()
    };

    let markdown = render_markdown(&fragment.html());
    let slug = slug_for_url(&page.url);
    let output_path = write_mdx(&options.output_dir, &slug, &markdown)?;
    info!("Successfully saved content to {}", output_path.display());

    Ok(PageOutcome {
        url: page.url,
        output_path,
        images,
    })
}

/// Scrape each URL in order. Failures are logged per URL and never stop the remaining ones.
pub fn scrape_all<F, I, S>(fetcher: &mut F, urls: I, options: &ScrapeOptions) -> BatchSummary
where
    F: Fetch + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = BatchSummary::default();
    for url in urls {
        let url = url.as_ref();
        match scrape_page(fetcher, url, options) {
            Ok(outcome) => summary.succeeded.push(outcome),
            Err(e) => {
                match &e {
                    PageError::Fetch(_) => error!("{}", e),
                    PageError::ContentNotFound { .. } => warn!("{}", e),
                    PageError::Filesystem { .. } | PageError::Other(_) => {
                        error!("An error occurred: {}", e)
                    }
                }
                summary.failed.push((url.to_string(), e.to_string()));
            }
        }
    }
    info!(
        "Finished: {} of {} page(s) saved",
        summary.succeeded.len(),
        summary.total()
    );
    summary
}
