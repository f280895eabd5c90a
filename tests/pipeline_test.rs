mod common;

use chrono::FixedOffset;
use medium_to_jekyll::config::{ConverterOptions, FigureStyle, RenderOptions};
use medium_to_jekyll::{ConvertError, convert_post_html_sync};
use std::path::Path;

use common::{CDN_IMAGE, create_comment_html, create_post_html};

fn tokyo() -> ConverterOptions {
    ConverterOptions::builder()
        .utc_offset(FixedOffset::east_opt(9 * 3600))
        .build()
        .expect("options")
}

fn body() -> String {
    format!(
        r#"<p name="b1" class="graf graf--p">Intro with <em>style</em> and <strong>weight</strong>.</p>
<h4 name="b2" class="graf graf--h4">Setup</h4>
<pre name="b3" class="graf graf--pre">ls -la<br>cd src</pre>
<pre name="b4" class="graf graf--pre">make all</pre>
<blockquote name="b5" class="graf graf--blockquote">First line</blockquote>
<blockquote name="b6" class="graf graf--blockquote">Second line</blockquote>
<figure name="b7" class="graf graf--figure"><img class="graf-image" data-image-id="1*hero.png" src="{CDN_IMAGE}"><figcaption class="imageCaption">A <em>hero</em> shot</figcaption></figure>
<ul class="postList"><li class="graf graf--li">one</li><li class="graf graf--li">two</li></ul>"#
    )
}

#[test]
fn test_published_post_end_to_end() {
    let html = create_post_html("Hello Jekyll", "hello-jekyll", &body(), Some("2020-05-01T20:00:00.000Z"));
    let options = ConverterOptions::builder()
        .utc_offset(FixedOffset::east_opt(9 * 3600))
        .detect_languages(false)
        .build()
        .expect("options");

    let result = convert_post_html_sync(&html, Path::new("posts/2020-05-01_Hello-Jekyll.html"), &options)
        .expect("convert");
    let content = &result.content;

    // Publish date shifts to the next day in +09:00
    assert_eq!(result.output_basename, "2020-05-02-hello-jekyll");
    assert!(
        content.starts_with("---\nlayout: post\ntitle: Hello Jekyll\npublished: true\ndate: 2020-05-02 05:00\n---\n\n"),
        "got: {content}"
    );

    // Title heading removed, h4 promoted
    assert!(!content.contains("Hello Jekyll\n="));
    assert!(!content.contains("## Hello Jekyll"));
    assert!(content.contains("### Setup"), "got: {content}");

    assert!(content.contains("Intro with _style_ and **weight**."));
    assert!(content.contains("```\nls -la\ncd src\n\nmake all\n```"), "got: {content}");
    assert!(content.contains("- one\n- two"), "got: {content}");

    let first = content.find("First line").expect("first quote line");
    let second = content.find("Second line").expect("second quote line");
    assert!(content[..first].ends_with("> "));
    assert!(!content[first..second].contains("\n\n"), "quotes not merged: {content}");

    assert!(
        content.contains(
            "<figure>\n  <img alt=\"\" src=\"/images/1*hero.png\" />\n  <figcaption>A <em>hero</em> shot</figcaption>\n</figure>"
        ),
        "got: {content}"
    );
    assert!(content.ends_with('\n'));
    assert!(!content.ends_with("\n\n"));
}

#[test]
fn test_assets_come_from_original_document() {
    let html = create_post_html("Hello Jekyll", "hello-jekyll", &body(), None);
    let result = convert_post_html_sync(&html, Path::new("draft.html"), &tokyo()).expect("convert");

    assert_eq!(result.assets.len(), 1);
    assert_eq!(result.assets[0].remote_url, CDN_IMAGE);
    assert_eq!(result.assets[0].local_path, "/images/1*hero.png");
    assert!(!result.content.contains("cdn-images"));
}

#[test]
fn test_draft_has_no_date() {
    let html = create_post_html("Work in progress", "work-in-progress", "<p>Soon.</p>", None);
    let result = convert_post_html_sync(&html, Path::new("draft.html"), &tokyo()).expect("convert");

    assert_eq!(result.output_basename, "draft-work-in-progress");
    assert!(result.content.contains("published: false\n"));
    assert!(!result.content.contains("date:"));
    assert!(!result.metadata.is_published());
}

#[test]
fn test_custom_image_prefix_and_alt_figures() {
    let html = create_post_html("Pictures", "pictures", &body(), None);
    let options = ConverterOptions::builder()
        .image_url_prefix("/assets/img/")
        .render(RenderOptions {
            figure_style: FigureStyle::Alt,
            ..RenderOptions::default()
        })
        .build()
        .expect("options");

    let result = convert_post_html_sync(&html, Path::new("p.html"), &options).expect("convert");
    assert!(
        result.content.contains("![A hero shot](/assets/img/1*hero.png)"),
        "got: {}",
        result.content
    );
}

#[test]
fn test_language_tag_added_to_code() {
    let code = "def greet(name):<br>    if name is None:<br>        return 'hi'<br>    print(f'hello {name}')";
    let html = create_post_html("Py", "py", &format!(r#"<pre class="graf graf--pre">{code}</pre>"#), None);

    let result = convert_post_html_sync(&html, Path::new("p.html"), &tokyo()).expect("convert");
    assert!(result.content.contains("```python\ndef greet(name):\n"), "got: {}", result.content);
}

#[test]
fn test_existing_language_hint_wins() {
    let html = create_post_html(
        "Hint",
        "hint",
        r#"<pre class="graf graf--pre"><code class="language-rust">fn main() {}</code></pre>"#,
        None,
    );

    let result = convert_post_html_sync(&html, Path::new("p.html"), &tokyo()).expect("convert");
    assert!(result.content.contains("```rust\nfn main() {}\n```"), "got: {}", result.content);
}

#[test]
fn test_comment_reply_is_skipped() {
    let html = create_comment_html("Great post, thanks!");
    let err = convert_post_html_sync(&html, Path::new("reply.html"), &tokyo()).expect_err("skip");

    assert!(matches!(err, ConvertError::NotAPost { .. }));
    assert!(err.is_skip());
}

#[test]
fn test_title_slug_used_without_canonical_link() {
    let html = r#"<html><head><title>Rust &amp; Jekyll: Notes!</title></head><body>
<section data-field="body"><section><h3>Rust &amp; Jekyll: Notes!</h3><p>x</p></section></section>
</body></html>"#;

    let result = convert_post_html_sync(html, Path::new("p.html"), &tokyo()).expect("convert");
    assert_eq!(result.output_basename, "draft-rust-jekyll-notes-");
}
