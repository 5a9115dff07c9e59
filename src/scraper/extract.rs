//! Content extraction. Isolates the article container of a documentation page and exposes its images.

use crate::scraper::error::PageError;
use scraper::{ElementRef, Html, Selector};

/// Class Docusaurus puts on the rendered article body.
pub const DEFAULT_CONTENT_CLASS: &str = "theme-doc-markdown";

/// Parse a CSS selector or return an error (avoids panics from Selector::parse).
fn parse_selector(sel: &str) -> Result<Selector, PageError> {
    Selector::parse(sel)
        .map_err(|e| PageError::Other(format!("invalid selector {:?}: {}", sel, e)))
}

/// Selector for the content container: a `div` carrying `class`.
fn content_selector(class: &str) -> Result<Selector, PageError> {
    let class = class.trim();
    if class.is_empty() || class.contains(char::is_whitespace) {
        return Err(PageError::Other(format!(
            "content class must be a single class name, got {:?}",
            class
        )));
    }
    parse_selector(&format!("div.{}", class))
}

/// One `<img>` in a fragment that carries a non-empty `src`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Position among all `<img>` elements of the fragment, document order.
    pub index: usize,
    /// Source attribute as written in the page.
    pub src: String,
}

/// The article subtree of a parsed page. Owns the document so image sources can be rewritten in place.
pub struct ContentFragment {
    doc: Html,
    container: Selector,
    img: Selector,
}

impl std::fmt::Debug for ContentFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentFragment")
            .field("html", &self.html())
            .finish()
    }
}

impl ContentFragment {
    fn root_element(&self) -> Option<ElementRef<'_>> {
        self.doc.select(&self.container).next()
    }

    /// Outer HTML of the container, including any rewritten sources.
    pub fn html(&self) -> String {
        self.root_element().map(|e| e.html()).unwrap_or_default()
    }

    /// Images with a usable `src`, in document order. Elements without `src`, or with an empty one, are left out.
    pub fn images(&self) -> Vec<ImageRef> {
        let Some(root) = self.root_element() else {
            return Vec::new();
        };
        root.select(&self.img)
            .enumerate()
            .filter_map(|(index, el)| {
                let src = el.value().attr("src")?.trim();
                if src.is_empty() {
                    return None;
                }
                Some(ImageRef {
                    index,
                    src: src.to_string(),
                })
            })
            .collect()
    }

    /// Point `image` at `src`. Only that element's attribute changes. Returns false if the element is gone.
    pub fn set_image_source(&mut self, image: &ImageRef, src: &str) -> bool {
        let id = match self.root_element() {
            Some(root) => root.select(&self.img).nth(image.index).map(|el| el.id()),
            None => None,
        };
        let Some(id) = id else {
            return false;
        };
        let Some(mut node) = self.doc.tree.get_mut(id) else {
            return false;
        };
        let scraper::Node::Element(element) = node.value() else {
            return false;
        };
        let mut replaced = false;
        for (name, value) in element.attrs.iter_mut() {
            if &*name.local == "src" {
                *value = src.into();
                replaced = true;
            }
        }
        replaced
    }
}

/// Parse `html` and isolate the first `div` carrying `class`. `Ok(None)` when nothing matches.
pub fn extract_content(html: &str, class: &str) -> Result<Option<ContentFragment>, PageError> {
    let container = content_selector(class)?;
    let img = parse_selector("img")?;
    let doc = Html::parse_document(html);
    if doc.select(&container).next().is_none() {
        return Ok(None);
    }
    Ok(Some(ContentFragment {
        doc,
        container,
        img,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Pay as you go</title></head>
<body>
  <nav><img src="/img/logo.svg" alt="logo"></nav>
  <div class="theme-doc-markdown markdown">
    <h1>Pay as you go</h1>
    <p>Intro text.</p>
    <img src="/img/diagram.png" alt="diagram">
    <img alt="no source">
    <img src="  ">
    <p><img src="https://cdn.example.com/assets/chart.svg" alt="chart"></p>
  </div>
  <div class="theme-doc-markdown">second container</div>
</body></html>"#;

    #[test]
    fn extracts_first_matching_container() {
        let fragment = extract_content(PAGE, DEFAULT_CONTENT_CLASS).unwrap().unwrap();
        let html = fragment.html();
        assert!(html.contains("Pay as you go"));
        assert!(html.contains("Intro text."));
        assert!(!html.contains("second container"));
        assert!(!html.contains("logo.svg"));
    }

    #[test]
    fn missing_container_is_none() {
        let html = "<html><body><div class=\"content\"><p>x</p></div></body></html>";
        assert!(extract_content(html, DEFAULT_CONTENT_CLASS).unwrap().is_none());
    }

    #[test]
    fn container_must_be_div() {
        let html = "<html><body><main class=\"theme-doc-markdown\"><p>x</p></main></body></html>";
        assert!(extract_content(html, DEFAULT_CONTENT_CLASS).unwrap().is_none());
    }

    #[test]
    fn rejects_multi_class_marker() {
        assert!(matches!(
            extract_content(PAGE, "theme-doc markdown"),
            Err(PageError::Other(_))
        ));
        assert!(matches!(extract_content(PAGE, "  "), Err(PageError::Other(_))));
    }

    #[test]
    fn images_skip_missing_and_empty_src() {
        let fragment = extract_content(PAGE, DEFAULT_CONTENT_CLASS).unwrap().unwrap();
        let images = fragment.images();
        assert_eq!(
            images,
            vec![
                ImageRef {
                    index: 0,
                    src: "/img/diagram.png".into()
                },
                ImageRef {
                    index: 3,
                    src: "https://cdn.example.com/assets/chart.svg".into()
                },
            ]
        );
    }

    #[test]
    fn set_image_source_rewrites_only_that_element() {
        let mut fragment = extract_content(PAGE, DEFAULT_CONTENT_CLASS).unwrap().unwrap();
        let images = fragment.images();
        assert!(fragment.set_image_source(&images[1], "images/chart.svg"));
        let html = fragment.html();
        assert!(html.contains(r#"src="images/chart.svg""#));
        assert!(html.contains(r#"src="/img/diagram.png""#));
        assert!(!html.contains("cdn.example.com"));
        assert_eq!(fragment.images()[1].src, "images/chart.svg");
    }

    #[test]
    fn set_image_source_out_of_range_is_false() {
        let mut fragment = extract_content(PAGE, DEFAULT_CONTENT_CLASS).unwrap().unwrap();
        let bogus = ImageRef {
            index: 42,
            src: "x.png".into(),
        };
        assert!(!fragment.set_image_source(&bogus, "images/x.png"));
    }
}
