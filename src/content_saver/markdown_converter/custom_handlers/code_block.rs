//! `<pre>` rendering: fenced or indented code blocks
//!
//! The cleanup stage guarantees each `<pre>` holds a single `<code>` wrapper,
//! and the language detector tags that wrapper with `language-<id>`. The text
//! is taken raw from the DOM so indentation and blank lines survive intact.

use htmd::{
    Element,
    element_handler::{ElementHandler, HandlerResult, Handlers},
};

use super::language_inference::extract_language_from_class;
use super::{extract_raw_text, find_descendant, get_attr, node_attr};
use crate::config::{CodeBlockStyle, CodeFence};

#[derive(Debug, Clone, Copy)]
pub struct CodeBlockHandler {
    style: CodeBlockStyle,
    fence: CodeFence,
}

impl CodeBlockHandler {
    #[must_use]
    pub fn new(style: CodeBlockStyle, fence: CodeFence) -> Self {
        Self { style, fence }
    }

    fn render(&self, code: &str, language: Option<&str>) -> String {
        match self.style {
            CodeBlockStyle::Fenced => {
                let fence = fence_for(code, self.fence.fence_char());
                let language = language.unwrap_or_default();
                format!("\n\n{fence}{language}\n{code}\n{fence}\n\n")
            }
            CodeBlockStyle::Indented => {
                let indented = code
                    .lines()
                    .map(|line| {
                        if line.trim().is_empty() {
                            String::new()
                        } else {
                            format!("    {line}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("\n\n{indented}\n\n")
            }
        }
    }
}

impl ElementHandler for CodeBlockHandler {
    fn handle(&self, _handlers: &dyn Handlers, element: Element) -> Option<HandlerResult> {
        let raw = extract_raw_text(element.node);
        let code = raw.trim_matches('\n');
        if code.trim().is_empty() {
            return Some(HandlerResult::from(String::new()));
        }

        // Language tag lives on the inner <code>; a bare <pre> may carry it itself
        let class = find_descendant(element.node, "code")
            .and_then(|code| node_attr(&code, "class"))
            .or_else(|| get_attr(element.attrs, "class"));
        let language = class.as_deref().and_then(extract_language_from_class);

        Some(HandlerResult::from(self.render(code, language.as_deref())))
    }
}

/// A fence one longer than any fence-character run opening a line of `code`
fn fence_for(code: &str, fence_char: char) -> String {
    let longest_run = code
        .lines()
        .map(|line| line.trim_start().chars().take_while(|&c| c == fence_char).count())
        .max()
        .unwrap_or(0);

    fence_char.to_string().repeat((longest_run + 1).max(3))
}
