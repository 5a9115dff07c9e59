//! Image localization: download every image of a content fragment and point it at the local copy.

use crate::model::ImageStats;
use crate::scraper::client::Fetch;
use crate::scraper::error::PageError;
use crate::scraper::extract::ContentFragment;
use reqwest::Url;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// File name used when a resolved image URL has no usable path segment.
const FALLBACK_IMAGE_NAME: &str = "image";

/// Resolve an image `src` against the page URL. Absolute sources are returned unchanged.
pub fn resolve_image_url(base: &Url, src: &str) -> Result<Url, String> {
    base.join(src).map_err(|e| e.to_string())
}

/// Local file name for an image: the last non-empty path segment of its URL.
pub fn image_file_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_IMAGE_NAME.to_string())
}

/// `src` value written back into the document: `images_dir` and `file_name` joined with `/`.
fn local_src(images_dir: &Path, file_name: &str) -> String {
    let dir = images_dir.to_string_lossy().replace('\\', "/");
    let dir = dir.trim_matches('/');
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", dir, file_name)
    }
}

fn progress_bar(total: usize) -> indicatif::ProgressBar {
    let bar = indicatif::ProgressBar::new(total as u64);
    if let Ok(style) =
        indicatif::ProgressStyle::default_bar().template("{spinner} {msg} [{bar:40}] {pos}/{len}")
    {
        bar.set_style(
            style
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
    }
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Run `log` with the progress bar (if any) hidden, so log lines on stderr do not tear it.
fn log_above<R>(bar: Option<&indicatif::ProgressBar>, log: impl FnOnce() -> R) -> R {
    match bar {
        Some(bar) => bar.suspend(log),
        None => log(),
    }
}

/// Download every image in `fragment` into `output_dir/images_dir` and rewrite its `src`.
///
/// Runs sequentially in document order. A failed image is logged and keeps its original
/// `src`; it never aborts the page. Two images with the same file name overwrite each other
/// on disk (a warning is logged). Only creating the images directory can fail the call.
pub fn localize_images<F: Fetch + ?Sized>(
    fetcher: &mut F,
    page_url: &str,
    fragment: &mut ContentFragment,
    output_dir: &Path,
    images_dir: &Path,
    show_progress: bool,
) -> Result<ImageStats, PageError> {
    let base = Url::parse(page_url)
        .map_err(|e| PageError::Other(format!("invalid page URL {}: {}", page_url, e)))?;

    let target_dir = output_dir.join(images_dir);
    std::fs::create_dir_all(&target_dir).map_err(|e| PageError::filesystem(&target_dir, e))?;

    let images = fragment.images();
    let mut stats = ImageStats {
        found: images.len(),
        ..ImageStats::default()
    };
    info!("Found {} images to download", images.len());

    let bar = (show_progress && !images.is_empty()).then(|| progress_bar(images.len()));
    let mut seen: HashSet<String> = HashSet::new();

    for image in &images {
        if let Some(bar) = &bar {
            bar.set_message(image.src.clone());
        }
        let url = match resolve_image_url(&base, &image.src) {
            Ok(u) if matches!(u.scheme(), "http" | "https") => Ok(u),
            Ok(u) => Err(format!("unsupported scheme {}", u.scheme())),
            Err(reason) => Err(reason),
        };
        let url = match url {
            Ok(u) => u,
            Err(reason) => {
                log_above(bar.as_ref(), || {
                    warn!(src = %image.src, "Failed to download image {}: {}", image.src, reason)
                });
                stats.failed += 1;
                if let Some(bar) = &bar {
                    bar.inc(1);
                }
                continue;
            }
        };

        let file_name = image_file_name(&url);
        if !seen.insert(file_name.clone()) {
            log_above(bar.as_ref(), || {
                warn!(
                    "Image file name {} is used more than once on {}; the later download overwrites the earlier one",
                    file_name, page_url
                )
            });
        }
        let dest = target_dir.join(&file_name);
        match fetcher.download(url.as_str(), &dest) {
            Ok(bytes) => {
                let src = local_src(images_dir, &file_name);
                fragment.set_image_source(image, &src);
                stats.downloaded += 1;
                log_above(bar.as_ref(), || {
                    info!("Downloaded {} -> {}", url, dest.display());
                    debug!(bytes, "image saved");
                });
            }
            Err(e) => {
                log_above(bar.as_ref(), || warn!("Failed to download image {}: {}", url, e));
                stats.failed += 1;
            }
        }
        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    if let Some(bar) = bar {
        bar.disable_steady_tick();
        bar.finish_and_clear();
    }
    Ok(stats)
}
