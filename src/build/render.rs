use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tera::{Context, Tera};

/// Format of `Page::generated_at`.
pub const GENERATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name the layout is registered under. It has no `.html` suffix, so Tera
/// does not autoescape; `Page::new` escapes the plain-text fields itself.
const LAYOUT_TEMPLATE: &str = "layout";

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("failed to read layout {path}: {source}")]
    LayoutRead {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The layout renderer, wrapping Tera.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    /// Read and parse the layout file.
    pub fn from_layout_file(layout_file: &Path) -> Result<Self, RenderError> {
        let source =
            std::fs::read_to_string(layout_file).map_err(|e| RenderError::LayoutRead {
                path: layout_file.to_path_buf(),
                source: e,
            })?;
        Self::from_layout_str(&source)
    }

    /// Parse a layout held in memory.
    pub fn from_layout_str(source: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(LAYOUT_TEMPLATE, source)?;
        Ok(Self { tera })
    }

    /// Render a page through the layout.
    ///
    /// The page fields are exposed at the top level of the template context:
    /// `title`, `content`, `generated_at` and `author`.
    pub fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        let context = Context::from_serialize(page)?;
        Ok(self.tera.render(LAYOUT_TEMPLATE, &context)?)
    }
}

/// One rendered document, alive only between rendering and writing.
///
/// `title` and `author` hold HTML-escaped text; `content` is HTML.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub title: String,
    /// Rendered HTML. Trusted: the layout decides whether to escape it.
    pub content: String,
    pub generated_at: String,
    pub author: String,
}

impl Page {
    pub fn new(
        title: String,
        content: String,
        author: String,
        generated_at: DateTime<Local>,
    ) -> Self {
        Self {
            title: tera::escape_html(&title),
            content,
            generated_at: generated_at.format(GENERATED_AT_FORMAT).to_string(),
            author: tera::escape_html(&author),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_page() -> Page {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        Page::new(
            "Hello".to_string(),
            "<h1>Hi</h1>".to_string(),
            "Ada".to_string(),
            at,
        )
    }

    #[test]
    fn test_generated_at_format() {
        assert_eq!(sample_page().generated_at, "2024-03-09 07:05:01");
    }

    #[test]
    fn test_render_all_fields() {
        let renderer = Renderer::from_layout_str(
            "<title>{{ title }}</title>{{ content }} by {{ author }} at {{ generated_at }}",
        )
        .unwrap();

        let html = renderer.render_page(&sample_page()).unwrap();
        assert_eq!(
            html,
            "<title>Hello</title><h1>Hi</h1> by Ada at 2024-03-09 07:05:01"
        );
    }

    #[test]
    fn test_content_is_not_escaped() {
        let renderer = Renderer::from_layout_str("{{ content }}").unwrap();
        let html = renderer.render_page(&sample_page()).unwrap();

        assert_eq!(html, "<h1>Hi</h1>");
    }

    #[test]
    fn test_title_and_author_are_escaped() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        let page = Page::new(
            "A<b>".to_string(),
            "<p>kept</p>".to_string(),
            "Tom & <script>x</script>".to_string(),
            at,
        );
        let renderer =
            Renderer::from_layout_str("<title>{{ title }}</title>{{ content }}{{ author }}")
                .unwrap();

        assert_eq!(
            renderer.render_page(&page).unwrap(),
            "<title>A&lt;b&gt;</title><p>kept</p>Tom &amp; &lt;script&gt;x&lt;&#x2F;script&gt;"
        );
    }

    #[test]
    fn test_layout_can_escape_explicitly() {
        let renderer = Renderer::from_layout_str("{{ content | escape }}").unwrap();
        let html = renderer.render_page(&sample_page()).unwrap();

        assert!(html.starts_with("&lt;h1&gt;"));
    }

    #[test]
    fn test_invalid_layout() {
        assert!(matches!(
            Renderer::from_layout_str("{{ content "),
            Err(RenderError::Template(_))
        ));
    }

    #[test]
    fn test_missing_layout_file() {
        let result = Renderer::from_layout_file(Path::new("/definitely/not/here.html"));
        assert!(matches!(result, Err(RenderError::LayoutRead { .. })));
    }

    #[test]
    fn test_unknown_variable_fails_render() {
        let renderer = Renderer::from_layout_str("{{ missing }}").unwrap();
        assert!(renderer.render_page(&sample_page()).is_err());
    }
}
