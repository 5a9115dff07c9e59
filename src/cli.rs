//! CLI parsing and orchestration. Parses args, merges config, runs the page pipeline for every URL. Maps errors to exit codes.

use crate::config::{self, Config};
use crate::model::BatchSummary;
use crate::scraper::{scrape_all, HttpClient, ScrapeOptions};
use clap::Parser;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Errors that stop the run before any page is processed.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Client(_) => 2,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "docscrape")]
#[command(about = "Scrape documentation pages and write their article content as MDX")]
#[command(
    after_help = "Config file keys (output_dir, images_dir, content_class, localize_images) are read from ./docscrape.toml or the user config dir. CLI flags override config."
)]
pub struct Args {
    /// Page URLs to scrape, processed in order.
    pub urls: Vec<String>,

    /// File with additional URLs, one per line. Blank lines and lines starting with '#' are ignored.
    #[arg(long)]
    pub urls_file: Option<PathBuf>,

    /// Output directory (default: output_mdx).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Image directory, relative to the output directory (default: images).
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// Keep image references as-is instead of downloading them.
    #[arg(long)]
    pub no_images: bool,

    /// Class of the div holding the article body (default: theme-doc-markdown).
    #[arg(long)]
    pub content_class: Option<String>,

    /// Suppress progress output (warnings and errors only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug-level logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// URLs from a list file: trimmed, skipping blank lines and `#` comments.
fn parse_url_list(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

fn read_url_list(path: &Path) -> Result<Vec<String>, CliRunError> {
    let s = std::fs::read_to_string(path).map_err(|e| {
        CliRunError::InvalidInput(format!("Cannot read URL file {}: {}", path.display(), e))
    })?;
    Ok(parse_url_list(&s))
}

/// Image sources are rewritten relative to the document, so the image directory must stay below the output directory.
fn validate_images_dir(dir: &Path) -> Result<(), CliRunError> {
    let escapes = dir.is_absolute()
        || dir
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(CliRunError::InvalidInput(format!(
            "Invalid images directory {}: must be a relative path inside the output directory.",
            dir.display()
        )));
    }
    Ok(())
}

/// Merge CLI flags over config over built-in defaults.
fn resolve_options(args: &Args, config: Option<&Config>) -> Result<ScrapeOptions, CliRunError> {
    let defaults = ScrapeOptions::default();
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.and_then(|c| c.output_dir.clone()))
        .unwrap_or(defaults.output_dir);
    let images_dir = args
        .images_dir
        .clone()
        .or_else(|| config.and_then(|c| c.images_dir.clone()))
        .unwrap_or(defaults.images_dir);
    validate_images_dir(&images_dir)?;
    let content_class = args
        .content_class
        .clone()
        .or_else(|| config.and_then(|c| c.content_class.clone()))
        .unwrap_or(defaults.content_class);
    let localize_images = if args.no_images {
        false
    } else {
        config
            .and_then(|c| c.localize_images)
            .unwrap_or(defaults.localize_images)
    };
    Ok(ScrapeOptions {
        output_dir,
        images_dir,
        content_class,
        localize_images,
        progress: !args.quiet,
    })
}

/// Entry point for the CLI. Page failures are logged and counted in the summary, not returned as errors.
pub fn run(args: &Args) -> Result<BatchSummary, CliRunError> {
    let mut urls = args.urls.clone();
    if let Some(ref path) = args.urls_file {
        urls.extend(read_url_list(path)?);
    }
    if urls.is_empty() {
        return Err(CliRunError::InvalidInput(
            "No URLs given. Pass one or more page URLs or --urls-file.".to_string(),
        ));
    }

    let config = config::load_config().map_err(CliRunError::InvalidInput)?;
    let options = resolve_options(args, config.as_ref())?;

    let mut client = HttpClient::new()?;
    Ok(scrape_all(&mut client, &urls, &options))
}
