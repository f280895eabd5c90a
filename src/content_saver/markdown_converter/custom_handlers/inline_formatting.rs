//! Headings, emphasis and thematic breaks with configurable markers

use htmd::{
    Element,
    element_handler::{ElementHandler, HandlerResult, Handlers},
};

use crate::config::{HeadingStyle, ThematicBreak};

/// Wraps inline content in a fixed delimiter (`_`, `*`, `**`, `__`)
#[derive(Debug, Clone, Copy)]
pub struct DelimiterHandler {
    delimiter: &'static str,
}

impl DelimiterHandler {
    #[must_use]
    pub fn new(delimiter: &'static str) -> Self {
        Self { delimiter }
    }
}

impl ElementHandler for DelimiterHandler {
    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        let content = handlers.walk_children(element.node).content;
        let inner = content.trim();
        if inner.is_empty() {
            return Some(HandlerResult::from(content));
        }

        // Delimiters must hug the text, so surrounding whitespace moves outside
        let leading = &content[..content.len() - content.trim_start().len()];
        let trailing = &content[content.trim_end().len()..];
        let d = self.delimiter;

        Some(HandlerResult::from(format!("{leading}{d}{inner}{d}{trailing}")))
    }
}

/// Renders `<hr>` with the configured marker
#[derive(Debug, Clone, Copy)]
pub struct ThematicBreakHandler {
    style: ThematicBreak,
}

impl ThematicBreakHandler {
    #[must_use]
    pub fn new(style: ThematicBreak) -> Self {
        Self { style }
    }
}

impl ElementHandler for ThematicBreakHandler {
    fn handle(&self, _handlers: &dyn Handlers, _element: Element) -> Option<HandlerResult> {
        Some(HandlerResult::from(format!("\n\n{}\n\n", self.style.marker())))
    }
}

/// Renders `<h1>`..`<h6>` in ATX or setext form.
///
/// Setext only exists for levels 1 and 2; deeper headings stay ATX.
#[derive(Debug, Clone, Copy)]
pub struct HeadingHandler {
    style: HeadingStyle,
}

impl HeadingHandler {
    #[must_use]
    pub fn new(style: HeadingStyle) -> Self {
        Self { style }
    }
}

impl ElementHandler for HeadingHandler {
    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        let level = heading_level(element.tag);
        let content = handlers.walk_children(element.node).content;
        let text = content.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            return Some(HandlerResult::from(String::new()));
        }

        let rendered = match (self.style, level) {
            (HeadingStyle::Setext, 1 | 2) => {
                let underline = if level == 1 { '=' } else { '-' };
                let width = text.chars().count().max(3);
                format!("{text}\n{}", underline.to_string().repeat(width))
            }
            _ => format!("{} {text}", "#".repeat(level)),
        };

        Some(HandlerResult::from(format!("\n\n{rendered}\n\n")))
    }
}

fn heading_level(tag: &str) -> usize {
    tag.strip_prefix('h')
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| (1..=6).contains(n))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderOptions;
    use crate::content_saver::markdown_converter::custom_handlers::create_converter;

    fn convert(html: &str, render: RenderOptions) -> String {
        create_converter(&render).convert(html).expect("conversion")
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), 1);
        assert_eq!(heading_level("h4"), 4);
        assert_eq!(heading_level("header"), 1);
    }

    #[test]
    fn test_atx_headings() {
        let md = convert("<h1>Top</h1><h4>Deep</h4>", RenderOptions::default());
        assert!(md.contains("# Top"), "got: {md}");
        assert!(md.contains("#### Deep"), "got: {md}");
    }

    #[test]
    fn test_setext_falls_back_to_atx_below_level_two() {
        let render = RenderOptions {
            heading_style: HeadingStyle::Setext,
            ..RenderOptions::default()
        };
        let md = convert("<h1>Hi</h1><h3>Three</h3>", render);
        assert!(md.contains("Hi\n==="), "got: {md}");
        assert!(md.contains("### Three"), "got: {md}");
    }

    #[test]
    fn test_emphasis_whitespace_moves_outside() {
        let md = convert("<p>a<em> spaced </em>b</p>", RenderOptions::default());
        assert!(md.contains("a _spaced_ b"), "got: {md}");
    }

    #[test]
    fn test_empty_emphasis_dropped() {
        let md = convert("<p>a<strong></strong>b</p>", RenderOptions::default());
        assert!(!md.contains("****"), "got: {md}");
    }

    #[test]
    fn test_dashes_break_is_default() {
        let md = convert("<p>a</p><hr><p>b</p>", RenderOptions::default());
        assert!(md.contains("\n---\n"), "got: {md}");
    }
}
