//! HTML to Markdown rendering with streaming post-processing.
//!
//! # Architecture
//!
//! 1. **htmd conversion**: the generic engine plus the custom element rules
//!    registered in [`create_converter`]
//! 2. **Streaming normalization**: one line-by-line pass that tracks code
//!    fences so nothing inside a code block is ever touched
//!
//! Each line is classified by its semantic type, which keeps the pass free of
//! regex lookarounds that could corrupt inline formatting.

use anyhow::{Context, Result};

use super::custom_handlers::create_converter;
use crate::config::{BulletMarker, RenderOptions};

/// Render a cleaned body fragment to normalized Markdown.
pub fn render_markdown(html: &str, render: &RenderOptions) -> Result<String> {
    let converter = create_converter(render);
    let markdown = converter
        .convert(html)
        .context("HTML to Markdown conversion failed")?;

    log::debug!(
        "Rendered {} bytes of HTML into {} bytes of Markdown",
        html.len(),
        markdown.len()
    );

    Ok(MarkdownNormalizer::new(render).normalize(&markdown))
}

/// Semantic classification of a Markdown line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineType {
    Blank,
    CodeFence,
    UnorderedList,
    OrderedList,
    Paragraph,
}

impl LineType {
    fn classify(line: &str) -> Self {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return LineType::Blank;
        }
        if fence_run(trimmed).is_some() {
            return LineType::CodeFence;
        }
        if bullet_marker(trimmed).is_some() {
            return LineType::UnorderedList;
        }
        let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
        if digits > 0 && (trimmed[digits..].starts_with(". ") || trimmed[digits..].starts_with(") ")) {
            return LineType::OrderedList;
        }
        LineType::Paragraph
    }
}

/// Opening fence character and run length, if `trimmed` starts a fence
fn fence_run(trimmed: &str) -> Option<(char, usize)> {
    let first = trimmed.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }
    let run = trimmed.chars().take_while(|&c| c == first).count();
    (run >= 3).then_some((first, run))
}

/// The bullet character of a list item line (`- `, `* `, `+ `)
fn bullet_marker(trimmed: &str) -> Option<char> {
    let mut chars = trimmed.chars();
    let marker = chars.next()?;
    let followed_by_space = chars.next().is_some_and(|c| c == ' ');
    (matches!(marker, '-' | '*' | '+') && followed_by_space).then_some(marker)
}

/// Line-oriented cleanup of engine output.
///
/// Outside code fences: runs of blank lines collapse to one, trailing
/// whitespace is stripped (two-space hard breaks survive), and `-` bullets
/// take the configured marker. Leading and trailing blank
/// lines are dropped.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownNormalizer {
    bullet: BulletMarker,
}

impl MarkdownNormalizer {
    #[must_use]
    pub fn new(render: &RenderOptions) -> Self {
        Self {
            bullet: render.bullet_marker,
        }
    }

    #[must_use]
    pub fn normalize(&self, markdown: &str) -> String {
        let mut output = String::with_capacity(markdown.len());
        let mut open_fence: Option<(char, usize)> = None;
        let mut in_list = false;
        let mut pending_blank = false;

        for line in markdown.lines() {
            if let Some((fence_char, fence_len)) = open_fence {
                push_line(&mut output, line);
                let trimmed = line.trim();
                if trimmed.chars().all(|c| c == fence_char)
                    && trimmed.chars().count() >= fence_len
                {
                    open_fence = None;
                }
                continue;
            }

            let line_type = LineType::classify(line);
            if line_type == LineType::Blank {
                pending_blank = !output.is_empty();
                continue;
            }
            if pending_blank {
                output.push('\n');
                pending_blank = false;
            }

            let indented = line.starts_with(' ') || line.starts_with('\t');
            match line_type {
                LineType::CodeFence => {
                    open_fence = fence_run(line.trim_start());
                    push_line(&mut output, line.trim_end());
                }
                LineType::UnorderedList if !indented || in_list => {
                    in_list = true;
                    push_line(&mut output, &self.rewrite_bullet(strip_trailing(line)));
                }
                LineType::OrderedList if !indented => {
                    in_list = true;
                    push_line(&mut output, strip_trailing(line));
                }
                _ => {
                    if !indented {
                        in_list = false;
                    }
                    push_line(&mut output, strip_trailing(line));
                }
            }
        }

        output.trim_end_matches('\n').to_string()
    }

    fn rewrite_bullet(&self, line: &str) -> String {
        if self.bullet == BulletMarker::Dash {
            return line.to_string();
        }
        let indent = line.len() - line.trim_start().len();
        let (prefix, rest) = line.split_at(indent);
        match rest.strip_prefix("- ") {
            Some(item) => format!("{prefix}{} {item}", self.bullet.marker()),
            None => line.to_string(),
        }
    }
}

fn push_line(output: &mut String, line: &str) {
    output.push_str(line);
    output.push('\n');
}

/// Trailing whitespace removed, except a Markdown hard break
fn strip_trailing(line: &str) -> &str {
    let content = line.trim_end();
    if !content.is_empty() && line[content.len()..].starts_with("  ") {
        &line[..content.len() + 2]
    } else {
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(markdown: &str, bullet: BulletMarker) -> String {
        let render = RenderOptions {
            bullet_marker: bullet,
            ..RenderOptions::default()
        };
        MarkdownNormalizer::new(&render).normalize(markdown)
    }

    #[test]
    fn test_blank_lines_collapse_outside_fences() {
        let input = "\n\n# A\n\n\n\npara\n```\nx\n\n\n\ny\n```\n\n\n";
        assert_eq!(
            normalize(input, BulletMarker::Dash),
            "# A\n\npara\n```\nx\n\n\n\ny\n```"
        );
    }

    #[test]
    fn test_trailing_whitespace() {
        let input = "text \t\nbreak    \nnext\n```\ncode   \n```";
        assert_eq!(
            normalize(input, BulletMarker::Dash),
            "text\nbreak  \nnext\n```\ncode   \n```"
        );
    }

    #[test]
    fn test_plus_bullets() {
        let input = "- one\n- two\n  - nested\n\nA - dash in prose\n\n```\n- not a list\n```";
        assert_eq!(
            normalize(input, BulletMarker::Plus),
            "+ one\n+ two\n  + nested\n\nA - dash in prose\n\n```\n- not a list\n```"
        );
    }

    #[test]
    fn test_asterisk_bullets() {
        assert_eq!(
            normalize("- one\n  - nested", BulletMarker::Asterisk),
            "* one\n  * nested"
        );
    }

    #[test]
    fn test_dash_bullets_untouched_by_default() {
        assert_eq!(normalize("- one\n- two", BulletMarker::Dash), "- one\n- two");
    }

    #[test]
    fn test_indented_code_outside_list_untouched() {
        let input = "para\n\n    - literal\n";
        assert_eq!(normalize(input, BulletMarker::Plus), "para\n\n    - literal");
    }

    #[test]
    fn test_longer_fence_not_closed_by_shorter() {
        let input = "````\n```\ninner\n```\n````\n\n\n\nafter";
        assert_eq!(
            normalize(input, BulletMarker::Dash),
            "````\n```\ninner\n```\n````\n\nafter"
        );
    }

    #[test]
    fn test_render_markdown_end_to_end() {
        let html = "<h2>Title</h2><p>Some <em>text</em>.</p><ul><li>a</li><li>b</li></ul>";
        let render = RenderOptions {
            bullet_marker: BulletMarker::Plus,
            ..RenderOptions::default()
        };
        let md = render_markdown(html, &render).expect("render");
        assert!(md.starts_with("## Title"), "got: {md}");
        assert!(md.contains("Some _text_."), "got: {md}");
        assert!(md.contains("+ a"), "got: {md}");
        assert!(!md.ends_with('\n'), "got: {md:?}");
    }
}
