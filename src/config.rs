//! Optional config file loading. Search order: ./docscrape.toml, then
//! $XDG_CONFIG_HOME/docscrape/config.toml (or ~/.config/docscrape/config.toml).

use serde::Deserialize;
use std::path::PathBuf;

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Base output directory when --output-dir is not set. Paths are relative to CWD.
    pub output_dir: Option<PathBuf>,
    /// Image directory, relative to the output directory.
    pub images_dir: Option<PathBuf>,
    /// Class of the element holding the article body.
    pub content_class: Option<String>,
    /// Download images and rewrite their sources (default: true).
    pub localize_images: Option<bool>,
}

/// Search order: (1) ./docscrape.toml, (2) $XDG_CONFIG_HOME/docscrape/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("docscrape.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("docscrape").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            let s = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            let config: Config = toml::from_str(&s)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
            tracing::debug!("Loaded config from {}", path.display());
            return Ok(Some(config));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let c: Config = toml::from_str("").unwrap();
        assert!(c.output_dir.is_none());
        assert!(c.images_dir.is_none());
        assert!(c.content_class.is_none());
        assert!(c.localize_images.is_none());
    }

    #[test]
    fn parse_full_config() {
        let s = r#"
            output_dir = "docs_out"
            images_dir = "assets/img"
            content_class = "markdown-body"
            localize_images = false
        "#;
        let c: Config = toml::from_str(s).unwrap();
        assert_eq!(
            c.output_dir.as_deref(),
            Some(std::path::Path::new("docs_out"))
        );
        assert_eq!(
            c.images_dir.as_deref(),
            Some(std::path::Path::new("assets/img"))
        );
        assert_eq!(c.content_class.as_deref(), Some("markdown-body"));
        assert_eq!(c.localize_images, Some(false));
    }

    #[test]
    fn parse_partial_config() {
        let c: Config = toml::from_str("images_dir = \"pics\"").unwrap();
        assert!(c.output_dir.is_none());
        assert_eq!(c.images_dir.as_deref(), Some(std::path::Path::new("pics")));
        assert!(c.localize_images.is_none());
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(toml::from_str::<Config>("output_dir = [").is_err());
        assert!(toml::from_str::<Config>("localize_images = \"yes\"").is_err());
    }
}
