//! `<figure>` folding
//!
//! A figure holding both an `<img>` and a `<figcaption>` becomes one of:
//!
//! - `alt`: `![caption](src "title")`, caption falling back to the image alt
//! - `title`: `![alt](src "caption")`, caption falling back to the image title
//! - `structured`: a literal `<figure>` block with the caption markup kept verbatim
//!
//! Anything else renders its children as ordinary block content.

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use htmd::{
    Element,
    element_handler::{ElementHandler, HandlerResult, Handlers},
};
use markup5ever_rcdom::{Handle, SerializableHandle};

use super::{extract_raw_text, find_descendant, node_attr};
use crate::config::FigureStyle;

#[derive(Debug, Clone, Copy)]
pub struct FigureHandler {
    style: FigureStyle,
}

/// The parts of a figure every style draws from
#[derive(Debug, Clone, PartialEq, Eq)]
struct FigureParts {
    src: String,
    alt: Option<String>,
    title: Option<String>,
    caption_text: Option<String>,
    caption_html: String,
}

impl FigureHandler {
    #[must_use]
    pub fn new(style: FigureStyle) -> Self {
        Self { style }
    }

    fn render(&self, parts: &FigureParts) -> String {
        match self.style {
            FigureStyle::Alt => {
                let alt = parts.caption_text.as_deref().or(parts.alt.as_deref());
                image_markdown(&parts.src, alt, parts.title.as_deref())
            }
            FigureStyle::Title => {
                let title = parts.caption_text.as_deref().or(parts.title.as_deref());
                image_markdown(&parts.src, parts.alt.as_deref(), title)
            }
            FigureStyle::Structured => {
                let mut img = format!(
                    r#"<img alt="{}" src="{}""#,
                    html_escape::encode_double_quoted_attribute(parts.alt.as_deref().unwrap_or_default()),
                    html_escape::encode_double_quoted_attribute(&parts.src),
                );
                if let Some(title) = &parts.title {
                    img.push_str(&format!(
                        r#" title="{}""#,
                        html_escape::encode_double_quoted_attribute(title)
                    ));
                }
                format!(
                    "<figure>\n  {img} />\n  <figcaption>{}</figcaption>\n</figure>",
                    parts.caption_html.trim()
                )
            }
        }
    }
}

impl ElementHandler for FigureHandler {
    fn handle(&self, handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        let Some(parts) = figure_parts(element.node) else {
            let content = handlers.walk_children(element.node).content;
            let content = content.trim_matches('\n');
            if content.trim().is_empty() {
                return Some(HandlerResult::from(String::new()));
            }
            return Some(HandlerResult::from(format!("\n\n{content}\n\n")));
        };

        Some(HandlerResult::from(format!("\n\n{}\n\n", self.render(&parts))))
    }
}

fn figure_parts(figure: &Handle) -> Option<FigureParts> {
    let img = find_descendant(figure, "img")?;
    let caption = find_descendant(figure, "figcaption")?;

    let caption_text = extract_raw_text(&caption)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    Some(FigureParts {
        src: node_attr(&img, "src").unwrap_or_default(),
        alt: node_attr(&img, "alt"),
        title: node_attr(&img, "title"),
        caption_text: Some(caption_text).filter(|t| !t.is_empty()),
        caption_html: inner_html(&caption),
    })
}

/// `![alt](src "title")`, the title part omitted when absent
fn image_markdown(src: &str, alt: Option<&str>, title: Option<&str>) -> String {
    let alt = alt.unwrap_or_default().replace('[', r"\[").replace(']', r"\]");
    match title.filter(|t| !t.is_empty()) {
        Some(title) => format!(r#"![{alt}]({src} "{}")"#, title.replace('"', "\\\"")),
        None => format!("![{alt}]({src})"),
    }
}

/// Serialized children of `node`; empty on serializer failure
fn inner_html(node: &Handle) -> String {
    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::ChildrenOnly(None),
        ..Default::default()
    };

    if let Err(e) = serialize(&mut buf, &SerializableHandle::from(node.clone()), opts) {
        log::warn!("Failed to serialize figure caption: {e}");
        return String::new();
    }

    String::from_utf8_lossy(&buf).into_owned()
}
