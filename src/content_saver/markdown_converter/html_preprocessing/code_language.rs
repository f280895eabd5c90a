//! Language tagging for cleaned code blocks
//!
//! Each `<pre>` without an existing `language-*` / `lang-*` hint is run
//! through the classifier and its `<code>` wrapper gains `language-<id>`.
//! Classification is best effort; an unknown block stays untagged.

use anyhow::{Result, anyhow};
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;

use crate::content_saver::markdown_converter::custom_handlers::language_inference::{
    LanguageAllowList, infer_language,
};

/// Tag every untagged code block in `html` (a body fragment).
///
/// Never fails the pipeline: a DOM error logs a warning and returns the
/// input unchanged.
#[must_use]
pub fn detect_code_block_languages(html: &str, allow: &LanguageAllowList) -> String {
    match tag_code_blocks(html, allow) {
        Ok(tagged) => tagged,
        Err(e) => {
            log::warn!("Code language detection skipped: {e:#}");
            html.to_string()
        }
    }
}

fn tag_code_blocks(html: &str, allow: &LanguageAllowList) -> Result<String> {
    if !html.contains("<pre") {
        return Ok(html.to_string());
    }

    let document = kuchiki::parse_html().one(html.to_string());
    let body = document
        .select_first("body")
        .map_err(|()| anyhow!("Parsed fragment has no body"))?
        .as_node()
        .clone();

    let blocks: Vec<NodeRef> = body
        .select("pre")
        .map_err(|()| anyhow!("Invalid CSS selector 'pre'"))?
        .map(|pre| pre.as_node().clone())
        .collect();

    let mut tagged = 0usize;
    for pre in blocks {
        let target = pre
            .children()
            .find(|child| child.as_element().is_some_and(|el| &*el.name.local == "code"))
            .unwrap_or_else(|| pre.clone());

        if has_language_hint(&pre) || has_language_hint(&target) {
            continue;
        }

        let text = pre.text_contents();
        let Some(language) = infer_language(&text, allow) else {
            continue;
        };

        if let Some(element) = target.as_element() {
            let mut attributes = element.attributes.borrow_mut();
            let class = match attributes.get("class") {
                Some(existing) if !existing.trim().is_empty() => {
                    format!("{existing} language-{language}")
                }
                _ => format!("language-{language}"),
            };
            attributes.insert("class", class);
            tagged += 1;
        }
    }

    log::debug!("Tagged {tagged} code blocks with a detected language");

    let mut output = Vec::new();
    for child in body.children() {
        child
            .serialize(&mut output)
            .map_err(|e| anyhow!("Failed to serialize HTML: {e}"))?;
    }
    String::from_utf8(output).map_err(|e| anyhow!("Failed to convert HTML to UTF-8: {e}"))
}

fn has_language_hint(node: &NodeRef) -> bool {
    node.as_element()
        .and_then(|el| el.attributes.borrow().get("class").map(str::to_string))
        .is_some_and(|class| {
            class
                .split_whitespace()
                .any(|part| part.starts_with("language-") || part.starts_with("lang-"))
        })
}
