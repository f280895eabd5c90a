//! Custom handlers for htmd HTML-to-Markdown conversion
//!
//! The generic engine renders everything else; these handlers cover what its
//! options cannot express: fenced code with a detected language, configurable
//! emphasis delimiters and thematic breaks, and figure/caption folding.

pub mod code_block;
pub mod figure;
pub mod inline_formatting;
pub mod language_inference;
pub mod language_patterns;

use htmd::{
    HtmlToMarkdown,
    options::{
        BulletListMarker, CodeBlockFence, CodeBlockStyle as MdCodeBlockStyle,
        LinkReferenceStyle as MdLinkReferenceStyle, LinkStyle as MdLinkStyle, Options,
    },
};
use markup5ever_rcdom::{Handle, NodeData};

use crate::config::{
    BulletMarker, CodeBlockStyle, CodeFence, LinkReferenceStyle, LinkStyle, RenderOptions,
};

pub use code_block::CodeBlockHandler;
pub use figure::FigureHandler;
pub use inline_formatting::{DelimiterHandler, HeadingHandler, ThematicBreakHandler};

/// Create an htmd converter honoring `render`
///
/// Custom handlers:
/// - `<h1>`..`<h6>`: ATX or setext headings
/// - `<pre>`: fenced or indented code block, language from `language-*` class
/// - `<em>`, `<i>`, `<strong>`, `<b>`: configured delimiters
/// - `<hr>`: configured thematic break
/// - `<figure>`: image + caption folding per `FigureStyle`
#[must_use]
pub fn create_converter(render: &RenderOptions) -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .options(engine_options(render))
        .add_handler(
            vec!["h1", "h2", "h3", "h4", "h5", "h6"],
            HeadingHandler::new(render.heading_style),
        )
        .add_handler(
            vec!["pre"],
            CodeBlockHandler::new(render.code_block_style, render.fence),
        )
        .add_handler(
            vec!["em", "i"],
            DelimiterHandler::new(render.emphasis_delimiter.delimiter()),
        )
        .add_handler(
            vec!["strong", "b"],
            DelimiterHandler::new(render.strong_delimiter.delimiter()),
        )
        .add_handler(vec!["hr"], ThematicBreakHandler::new(render.thematic_break))
        .add_handler(vec!["figure"], FigureHandler::new(render.figure_style))
        .build()
}

/// Engine options for everything the engine renders itself
fn engine_options(render: &RenderOptions) -> Options {
    Options {
        // `+` is not an engine marker; the normalizer rewrites dashes afterwards
        bullet_list_marker: match render.bullet_marker {
            BulletMarker::Asterisk => BulletListMarker::Asterisk,
            BulletMarker::Dash | BulletMarker::Plus => BulletListMarker::Dash,
        },
        ul_bullet_spacing: 1,
        code_block_style: match render.code_block_style {
            CodeBlockStyle::Fenced => MdCodeBlockStyle::Fenced,
            CodeBlockStyle::Indented => MdCodeBlockStyle::Indented,
        },
        code_block_fence: match render.fence {
            CodeFence::Backtick => CodeBlockFence::Backticks,
            CodeFence::Tilde => CodeBlockFence::Tildes,
        },
        link_style: match render.link_style {
            LinkStyle::Inlined => MdLinkStyle::Inlined,
            LinkStyle::Referenced => MdLinkStyle::Referenced,
        },
        link_reference_style: match render.link_reference_style {
            LinkReferenceStyle::Full => MdLinkReferenceStyle::Full,
            LinkReferenceStyle::Collapsed => MdLinkReferenceStyle::Collapsed,
            LinkReferenceStyle::Shortcut => MdLinkReferenceStyle::Shortcut,
        },
        ..Default::default()
    }
}

// === Helper Functions ===

/// Extract raw text content from a node tree, preserving all whitespace
pub(crate) fn extract_raw_text(node: &Handle) -> String {
    let mut text = String::new();

    match &node.data {
        NodeData::Text { contents } => {
            text.push_str(&contents.borrow());
        }
        NodeData::Element { .. } | NodeData::Document | NodeData::Doctype { .. } => {
            for child in node.children.borrow().iter() {
                text.push_str(&extract_raw_text(child));
            }
        }
        NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. } => {}
    }

    text
}

/// Tag name of an element node
pub(crate) fn tag_name(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

/// First descendant element (depth-first, document order) with the given tag
pub(crate) fn find_descendant(node: &Handle, tag: &str) -> Option<Handle> {
    for child in node.children.borrow().iter() {
        if tag_name(child).as_deref() == Some(tag) {
            return Some(child.clone());
        }
        if let Some(found) = find_descendant(child, tag) {
            return Some(found);
        }
    }
    None
}

/// Non-blank attribute value of an element node
pub(crate) fn node_attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => get_attr(&attrs.borrow(), name),
        _ => None,
    }
}

/// Get attribute value from element
pub(crate) fn get_attr(attrs: &[html5ever::Attribute], name: &str) -> Option<String> {
    attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
        .filter(|v| !v.trim().is_empty())
}
