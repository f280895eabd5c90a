//! Structural cleanup of the exported post body
//!
//! Runs a fixed sequence of DOM rewrites over the `section[data-field=body]`
//! region and returns that region's inner HTML. Every pass collects its
//! targets before mutating so no iterator ever observes a detached node.
//!
//! Order matters: the title heading is removed before headings are shifted
//! up a level, and code fragments are flattened before adjacent blocks merge.

use anyhow::{Result, anyhow};
use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink;
use std::collections::HashMap;

const BODY_REGION_SELECTOR: &str = "section[data-field=body]";

/// Clean an asset-rewritten export and return the body region's inner HTML.
///
/// `asset_map` maps remote image URLs to local paths. Images already
/// rewritten no longer carry a remote URL and are left alone. A document
/// without a body region yields an empty string.
pub fn cleanup_post_html(html: &str, asset_map: Option<&HashMap<String, String>>) -> Result<String> {
    let document = kuchiki::parse_html().one(html.to_string());

    let Ok(region) = document.select_first(BODY_REGION_SELECTOR) else {
        log::warn!("Document has no {BODY_REGION_SELECTOR} region; body is empty");
        return Ok(String::new());
    };
    let region = region.as_node().clone();

    let mut cleanup = StructuralCleanup::new(region);
    cleanup.remove_leading_divider()?;
    cleanup.remove_title_heading()?;
    cleanup.escalate_headings()?;
    cleanup.flatten_code_blocks()?;
    cleanup.merge_adjacent("pre", MergeSeparator::BlankLine)?;
    cleanup.rewrap_code_blocks()?;
    cleanup.merge_adjacent("blockquote", MergeSeparator::DoubleBreak)?;
    if let Some(map) = asset_map {
        cleanup.apply_asset_map(map)?;
    }

    log::debug!(
        "Structural cleanup: title removed={}, headings escalated={}, blocks merged={}",
        cleanup.title_removed,
        cleanup.headings_escalated,
        cleanup.blocks_merged
    );

    cleanup.inner_html()
}

/// Per-document cleanup state
struct StructuralCleanup {
    region: NodeRef,
    title_removed: bool,
    headings_escalated: usize,
    blocks_merged: usize,
}

enum MergeSeparator {
    /// `"\n\n"` text between code fragments
    BlankLine,
    /// Two `<br>` elements between quote fragments
    DoubleBreak,
}

impl StructuralCleanup {
    fn new(region: NodeRef) -> Self {
        Self {
            region,
            title_removed: false,
            headings_escalated: 0,
            blocks_merged: 0,
        }
    }

    /// First `<section>` inside the body region, or the region itself
    fn first_section(&self) -> NodeRef {
        self.region
            .descendants()
            .find(|node| is_element(node, "section"))
            .unwrap_or_else(|| self.region.clone())
    }

    fn remove_leading_divider(&mut self) -> Result<()> {
        if let Ok(divider) = self.first_section().select_first(".section-divider") {
            divider.as_node().detach();
        }
        Ok(())
    }

    /// The first `h3` of the first section repeats the post title
    fn remove_title_heading(&mut self) -> Result<()> {
        if self.title_removed {
            return Ok(());
        }
        if let Ok(heading) = self.first_section().select_first("h3") {
            heading.as_node().detach();
            self.title_removed = true;
        }
        Ok(())
    }

    /// `h3`..`h6` each move up one level
    fn escalate_headings(&mut self) -> Result<()> {
        let headings = select_all(&self.region, "h3, h4, h5, h6")?;

        for heading in headings {
            let Some(level) = heading
                .as_element()
                .and_then(|el| el.name.local.strip_prefix('h').and_then(|n| n.parse::<u8>().ok()))
            else {
                continue;
            };
            rename_element(&heading, &format!("h{}", level - 1))?;
            self.headings_escalated += 1;
        }
        Ok(())
    }

    /// `<br>` inside code becomes a newline; a lone `<code>` child is unwrapped
    fn flatten_code_blocks(&mut self) -> Result<()> {
        for br in select_all(&self.region, "pre br")? {
            br.insert_before(NodeRef::new_text("\n"));
            br.detach();
        }

        for pre in select_all(&self.region, "pre")? {
            let Some(code) = lone_code_child(&pre) else {
                continue;
            };
            carry_classes(&code, &pre);
            for child in code.children().collect::<Vec<_>>() {
                code.insert_before(child);
            }
            code.detach();
        }
        Ok(())
    }

    /// Fold each `tag` element into an immediately preceding `tag` sibling.
    ///
    /// Whitespace-only text between the two does not break adjacency, so a
    /// run of fragments collapses into its first element.
    fn merge_adjacent(&mut self, tag: &str, separator: MergeSeparator) -> Result<()> {
        for node in select_all(&self.region, tag)? {
            let Some(previous) = previous_element_sibling(&node) else {
                continue;
            };
            if !is_element(&previous, tag) {
                continue;
            }

            match separator {
                MergeSeparator::BlankLine => previous.append(NodeRef::new_text("\n\n")),
                MergeSeparator::DoubleBreak => {
                    previous.append(new_element("br")?);
                    previous.append(new_element("br")?);
                }
            }
            for child in node.children().collect::<Vec<_>>() {
                previous.append(child);
            }
            node.detach();
            self.blocks_merged += 1;
        }
        Ok(())
    }

    /// Every `<pre>` ends up holding exactly one fresh `<code>` wrapper
    fn rewrap_code_blocks(&mut self) -> Result<()> {
        for pre in select_all(&self.region, "pre")? {
            let code = new_element("code")?;
            for child in pre.children().collect::<Vec<_>>() {
                code.append(child);
            }
            pre.append(code);
        }
        Ok(())
    }

    fn apply_asset_map(&mut self, map: &HashMap<String, String>) -> Result<()> {
        for img in select_all(&self.region, "img[src]")? {
            let Some(element) = img.as_element() else {
                continue;
            };
            let mut attributes = element.attributes.borrow_mut();
            let local = attributes.get("src").and_then(|src| map.get(src)).cloned();
            if let Some(local) = local {
                attributes.insert("src", local);
            }
        }
        Ok(())
    }

    fn inner_html(&self) -> Result<String> {
        let mut output = Vec::new();
        for child in self.region.children() {
            child
                .serialize(&mut output)
                .map_err(|e| anyhow!("Failed to serialize HTML: {e}"))?;
        }
        String::from_utf8(output).map_err(|e| anyhow!("Failed to convert HTML to UTF-8: {e}"))
    }
}

/// All matches under `root`, collected up front so callers may mutate freely
fn select_all(root: &NodeRef, selector: &str) -> Result<Vec<NodeRef>> {
    Ok(root
        .select(selector)
        .map_err(|()| anyhow!("Invalid CSS selector '{selector}'"))?
        .map(|el| el.as_node().clone())
        .collect())
}

fn is_element(node: &NodeRef, tag: &str) -> bool {
    node.as_element()
        .is_some_and(|el| (&*el.name.local).eq_ignore_ascii_case(tag))
}

fn is_blank_text(node: &NodeRef) -> bool {
    node.as_text()
        .is_some_and(|text| text.borrow().trim().is_empty())
}

/// Previous sibling element, skipping whitespace text and comments
fn previous_element_sibling(node: &NodeRef) -> Option<NodeRef> {
    let mut current = node.previous_sibling();
    while let Some(sibling) = current {
        if sibling.as_element().is_some() {
            return Some(sibling);
        }
        if !is_blank_text(&sibling) && sibling.as_comment().is_none() {
            return None;
        }
        current = sibling.previous_sibling();
    }
    None
}

/// The `<code>` child of `pre` when it is the only meaningful content
fn lone_code_child(pre: &NodeRef) -> Option<NodeRef> {
    let mut code = None;
    for child in pre.children() {
        if child.as_element().is_some() {
            if code.is_some() || !is_element(&child, "code") {
                return None;
            }
            code = Some(child);
        } else if child.as_text().is_some() && !is_blank_text(&child) {
            return None;
        }
    }
    code
}

/// Append the `class` tokens of `from` to those of `to`, keeping language hints
fn carry_classes(from: &NodeRef, to: &NodeRef) {
    let (Some(from), Some(to)) = (from.as_element(), to.as_element()) else {
        return;
    };
    let Some(extra) = from.attributes.borrow().get("class").map(str::to_string) else {
        return;
    };
    let mut attributes = to.attributes.borrow_mut();
    let merged = match attributes.get("class") {
        Some(existing) if !existing.trim().is_empty() => format!("{existing} {extra}"),
        _ => extra,
    };
    attributes.insert("class", merged);
}

/// A detached, empty element named `tag`
fn new_element(tag: &str) -> Result<NodeRef> {
    let fragment = kuchiki::parse_html().one(format!("<{tag}></{tag}>"));
    let element = fragment
        .select_first(tag)
        .map_err(|()| anyhow!("Failed to create <{tag}> element"))?;
    let node = element.as_node().clone();
    node.detach();
    Ok(node)
}

/// Replace `node` with a `tag` element carrying the same attributes and children
fn rename_element(node: &NodeRef, tag: &str) -> Result<()> {
    let Some(old) = node.as_element() else {
        return Ok(());
    };
    let replacement = new_element(tag)?;
    if let Some(new) = replacement.as_element() {
        new.attributes.borrow_mut().map = old.attributes.borrow().map.clone();
    }
    for child in node.children().collect::<Vec<_>>() {
        replacement.append(child);
    }
    node.insert_before(replacement);
    node.detach();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export(body: &str) -> String {
        format!(
            r#"<html><head><title>T</title></head><body><article>
<section data-field="body" class="e-content">{body}</section>
</article></body></html>"#
        )
    }

    fn clean(body: &str) -> String {
        cleanup_post_html(&export(body), None).expect("cleanup")
    }

    #[test]
    fn test_tag_match_ignores_case() {
        let document = kuchiki::parse_html().one("<h3>t</h3>".to_string());
        let heading = document.select_first("h3").expect("h3").as_node().clone();
        assert!(is_element(&heading, "h3"));
        assert!(is_element(&heading, "H3"));
        assert!(!is_element(&heading, "h4"));
    }

    #[test]
    fn test_missing_region_is_empty() {
        let html = "<html><body><p>no region</p></body></html>";
        assert_eq!(cleanup_post_html(html, None).expect("cleanup"), "");
    }

    #[test]
    fn test_output_is_region_inner_html() {
        let out = clean("<p>Hello</p>");
        assert_eq!(out, "<p>Hello</p>");
        assert!(!out.contains("<title>"));
    }

    #[test]
    fn test_first_section_divider_and_title_removed() {
        let out = clean(
            r#"<section class="section--first"><div class="section-divider"><hr class="section-divider"></div>
<div class="section-content"><h3 class="graf--title">Title</h3><p>Intro</p></div></section>
<section><div class="section-divider"><hr class="section-divider"></div>
<h3>Later</h3></section>"#,
        );
        assert!(!out.contains(">Title<"), "got: {out}");
        assert_eq!(out.matches("section-divider").count(), 2, "got: {out}");
        assert!(out.contains("<h2>Later</h2>"), "got: {out}");
    }

    #[test]
    fn test_title_removed_without_sections() {
        let out = clean("<h3>Title</h3><p>x</p><h3>Second</h3>");
        assert!(!out.contains("Title"), "got: {out}");
        assert!(out.contains("<h2>Second</h2>"), "got: {out}");
    }

    #[test]
    fn test_heading_escalation_keeps_attributes() {
        let out = clean(r#"<h3>t</h3><h4 class="graf">Sub</h4><h5>x</h5><h6>y</h6><h2>z</h2>"#);
        assert!(out.contains(r#"<h3 class="graf">Sub</h3>"#), "got: {out}");
        assert!(out.contains("<h4>x</h4>"), "got: {out}");
        assert!(out.contains("<h5>y</h5>"), "got: {out}");
        assert!(out.contains("<h2>z</h2>"), "got: {out}");
        assert!(!out.contains("<h6>"), "got: {out}");
    }

    #[test]
    fn test_code_breaks_become_newlines() {
        let out = clean("<h3>t</h3><pre>line1<br>line2<br/>line3</pre>");
        assert!(out.contains("<pre><code>line1\nline2\nline3</code></pre>"), "got: {out}");
    }

    #[test]
    fn test_nested_code_flattened_and_rewrapped() {
        let out = clean(r#"<h3>t</h3><pre> <code>a &lt; b<br>c</code> </pre>"#);
        assert!(out.contains("<pre><code> a &lt; b\nc </code></pre>"), "got: {out}");
        assert_eq!(out.matches("<code").count(), 1, "got: {out}");
    }

    #[test]
    fn test_lifted_code_class_moves_to_block() {
        let out = clean(r#"<h3>t</h3><pre class="graf"><code class="language-rust">fn main() {}</code></pre>"#);
        assert!(
            out.contains(r#"<pre class="graf language-rust"><code>fn main() {}</code></pre>"#),
            "got: {out}"
        );
    }

    #[test]
    fn test_adjacent_code_blocks_merge() {
        let out = clean("<h3>t</h3><pre><code>foo</code></pre>\n<pre><code>bar</code></pre><pre>baz</pre>");
        assert!(out.contains("<pre><code>foo\n\nbar\n\nbaz</code></pre>"), "got: {out}");
        assert_eq!(out.matches("<pre").count(), 1, "got: {out}");
    }

    #[test]
    fn test_separated_code_blocks_stay_apart() {
        let out = clean("<h3>t</h3><pre>foo</pre><p>between</p><pre>bar</pre>");
        assert_eq!(out.matches("<pre>").count(), 2, "got: {out}");
    }

    #[test]
    fn test_adjacent_quotes_merge_with_breaks() {
        let out = clean("<h3>t</h3><blockquote>one</blockquote> <blockquote>two</blockquote>");
        assert!(out.contains("<blockquote>one<br><br>two</blockquote>"), "got: {out}");
    }

    #[test]
    fn test_asset_map_rewrites_remaining_remote_images() {
        let remote = "https://cdn-images-1.medium.com/max/800/1*a.png";
        let body = format!(r#"<h3>t</h3><img src="{remote}"><img src="/images/1*b.png">"#);
        let map = HashMap::from([(remote.to_string(), "/images/1*a.png".to_string())]);
        let out = cleanup_post_html(&export(&body), Some(&map)).expect("cleanup");
        assert!(out.contains(r#"src="/images/1*a.png""#), "got: {out}");
        assert!(out.contains(r#"src="/images/1*b.png""#), "got: {out}");
        assert!(!out.contains(remote), "got: {out}");
    }

    #[test]
    fn test_independent_calls_each_remove_their_title() {
        let first = clean("<h3>First</h3><p>a</p>");
        let second = clean("<h3>Second</h3><p>b</p>");
        assert!(!first.contains("First"));
        assert!(!second.contains("Second"));
    }
}
