//! Markdown rendering that leaves embedded HTML alone.
//!
//! The source is split on a permissive tag pattern: tag-delimited regions are
//! copied verbatim and everything in between goes through pulldown-cmark.

use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, html};
use regex::Regex;

use crate::config::MarkdownConfig;

/// An opening tag up to the nearest closing tag (lazy), a self-closing tag, or
/// a lone opening tag. Alternation is leftmost-first, so order matters.
static HTML_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[a-zA-Z][^>]*>[\s\S]*?</[a-zA-Z][^>]*>|<[a-zA-Z][^>/]*/>|<[a-zA-Z][^>]*>")
        .expect("HTML region pattern is valid")
});

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// Widen every `"\n- "` to `"\n\n- "` so loosely written bullet lists become
/// blank-line separated.
///
/// Applied unconditionally: a line that merely starts with `"- "` is rewritten
/// too.
pub fn space_list_items(markdown: &str) -> String {
    markdown.replace("\n- ", "\n\n- ")
}

/// Markdown converter configured once per build.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
    hard_breaks: bool,
}

impl MarkdownRenderer {
    pub fn new(markdown_config: &MarkdownConfig) -> Result<Self, MarkdownError> {
        let mut options = Options::empty();
        for extension in &markdown_config.extensions {
            match extension.as_str() {
                "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
                "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
                "gfm" => options.insert(Options::ENABLE_GFM),
                "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
                "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
                "tables" => options.insert(Options::ENABLE_TABLES),
                "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
                other => return Err(MarkdownError::InvalidExtension(other.to_string())),
            }
        }

        Ok(Self {
            options,
            hard_breaks: markdown_config.hard_breaks,
        })
    }

    /// Convert mixed Markdown/HTML to HTML.
    ///
    /// Tag-delimited regions are passed through byte-for-byte; the spans
    /// between them are converted independently and stitched back in order.
    pub fn transform(&self, source: &str) -> String {
        let mut output = String::with_capacity(source.len() * 2);
        let mut last = 0;

        for region in HTML_REGION.find_iter(source) {
            if region.start() > last {
                self.push_markdown(&mut output, &source[last..region.start()]);
            }
            output.push_str(region.as_str());
            last = region.end();
        }

        if last < source.len() {
            self.push_markdown(&mut output, &source[last..]);
        }

        output
    }

    /// Convert a whole buffer as Markdown, with no HTML splitting.
    #[cfg(test)]
    pub fn render(&self, markdown: &str) -> String {
        let mut output = String::new();
        self.push_markdown(&mut output, markdown);
        output
    }

    fn push_markdown(&self, output: &mut String, markdown: &str) {
        let hard_breaks = self.hard_breaks;
        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::SoftBreak if hard_breaks => Event::HardBreak,
            _ => event,
        });
        html::push_html(output, parser);
    }
}
