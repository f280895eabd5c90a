//! Markdown style options applied to cleaned body fragments

use medium_to_jekyll::config::{
    BulletMarker, CodeBlockStyle, CodeFence, EmphasisDelimiter, FigureStyle, HeadingStyle,
    RenderOptions, StrongDelimiter, ThematicBreak,
};
use medium_to_jekyll::render_markdown;

const FIGURE: &str = r#"<figure><img src="/images/1*a.png" alt="Alt" title="Tip"><figcaption>The <a href="https://example.com">caption</a></figcaption></figure>"#;

fn render(html: &str, render: RenderOptions) -> String {
    render_markdown(html, &render).expect("render")
}

fn with_figure(style: FigureStyle) -> RenderOptions {
    RenderOptions {
        figure_style: style,
        ..RenderOptions::default()
    }
}

#[test]
fn test_figure_caption_as_alt() {
    let md = render(FIGURE, with_figure(FigureStyle::Alt));
    assert_eq!(md, r#"![The caption](/images/1*a.png "Tip")"#);
}

#[test]
fn test_figure_caption_as_title() {
    let md = render(FIGURE, with_figure(FigureStyle::Title));
    assert_eq!(md, r#"![Alt](/images/1*a.png "The caption")"#);
}

#[test]
fn test_figure_kept_as_html() {
    let md = render(FIGURE, with_figure(FigureStyle::Structured));
    assert_eq!(
        md,
        "<figure>\n  <img alt=\"Alt\" src=\"/images/1*a.png\" title=\"Tip\" />\n  \
         <figcaption>The <a href=\"https://example.com\">caption</a></figcaption>\n</figure>"
    );
}

#[test]
fn test_figure_without_caption_renders_image() {
    let md = render(
        r#"<figure><img src="/images/b.png" alt="Only"></figure>"#,
        with_figure(FigureStyle::Alt),
    );
    assert!(md.contains("![Only](/images/b.png)"), "got: {md}");
}

#[test]
fn test_figures_are_separate_blocks() {
    let html = format!("<p>Before</p>{FIGURE}<p>After</p>");
    let md = render(&html, with_figure(FigureStyle::Alt));
    assert_eq!(md, "Before\n\n![The caption](/images/1*a.png \"Tip\")\n\nAfter");
}

#[test]
fn test_setext_headings() {
    let options = RenderOptions {
        heading_style: HeadingStyle::Setext,
        ..RenderOptions::default()
    };
    let md = render("<h1>Top</h1><h2>Second part</h2><h3>Third</h3>", options);
    assert_eq!(md, "Top\n===\n\nSecond part\n-----------\n\n### Third");
}

#[test]
fn test_delimiters_and_breaks() {
    let options = RenderOptions {
        emphasis_delimiter: EmphasisDelimiter::Asterisk,
        strong_delimiter: StrongDelimiter::Underscores,
        thematic_break: ThematicBreak::Asterisks,
        ..RenderOptions::default()
    };
    let md = render("<p><em>a</em> <strong>b</strong></p><hr><p>c</p>", options);
    assert_eq!(md, "*a* __b__\n\n* * *\n\nc");
}

#[test]
fn test_plus_bullets() {
    let options = RenderOptions {
        bullet_marker: BulletMarker::Plus,
        ..RenderOptions::default()
    };
    let md = render("<ul><li>one</li><li>two</li></ul>", options);
    assert_eq!(md, "+ one\n+ two");
}

#[test]
fn test_asterisk_bullets() {
    let options = RenderOptions {
        bullet_marker: BulletMarker::Asterisk,
        ..RenderOptions::default()
    };
    let md = render("<ul><li>one</li><li>two</li></ul>", options);
    assert_eq!(md, "* one\n* two");
}

#[test]
fn test_tilde_fence_with_language() {
    let options = RenderOptions {
        fence: CodeFence::Tilde,
        ..RenderOptions::default()
    };
    let md = render(r#"<pre class="language-go"><code>package main</code></pre>"#, options);
    assert_eq!(md, "~~~go\npackage main\n~~~");
}

#[test]
fn test_indented_code() {
    let options = RenderOptions {
        code_block_style: CodeBlockStyle::Indented,
        ..RenderOptions::default()
    };
    let md = render("<p>x</p><pre><code>a = 1\n\nb = 2</code></pre>", options);
    assert_eq!(md, "x\n\n    a = 1\n\n    b = 2");
}

#[test]
fn test_code_content_is_not_escaped() {
    let md = render("<pre><code>let *p = a_b[0];</code></pre>", RenderOptions::default());
    assert_eq!(md, "```\nlet *p = a_b[0];\n```");
}
