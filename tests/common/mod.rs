//! Test utilities and helper functions for the converter test suite

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub const CDN_IMAGE: &str = "https://cdn-images-1.medium.com/max/800/1*hero.png";

/// Creates a temporary directory for test output
#[allow(dead_code)]
pub fn create_test_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Builds an export shaped like Medium's `posts/*.html`
///
/// The body gets the title heading and section divider Medium always emits;
/// `published` is an RFC 3339 timestamp or `None` for a draft.
#[allow(dead_code)]
pub fn create_post_html(title: &str, slug: &str, body: &str, published: Option<&str>) -> String {
    let title = html_escape::encode_text(title);
    let time = published
        .map(|ts| format!(r#"<time class="dt-published" datetime="{ts}">{ts}</time>"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html><head><meta http-equiv="Content-Type" content="text/html; charset=utf-8"><title>{title}</title></head>
<body><article class="h-entry">
<header><h1 class="p-name">{title}</h1></header>
<section data-field="subtitle" class="p-summary">Subtitle</section>
<section data-field="body" class="e-content">
<section name="3a41" class="section section--body section--first">
<div class="section-divider"><hr class="section-divider"></div>
<div class="section-content"><div class="section-inner sectionLayout--insetColumn">
<h3 name="aa01" class="graf graf--h3 graf--leading graf--title">{title}</h3>
{body}
</div></div></section>
</section>
<footer><p>By <a href="https://medium.com/@someone" class="p-author h-card">Someone</a> on {time}.</p>
<p><a href="https://medium.com/@someone/{slug}-5e1c53a62ef2" class="p-canonical">Canonical link</a></p></footer>
</article></body></html>"#
    )
}

/// A reply: Medium exports these as posts whose body has no `h3`
#[allow(dead_code)]
pub fn create_comment_html(text: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html><head><title>{0}</title></head>
<body><article class="h-entry">
<section data-field="body" class="e-content"><section class="section section--first">
<div class="section-content"><p class="graf graf--p">{0}</p></div></section></section>
<footer><a href="https://medium.com/@someone/a1b2c3d4" class="p-canonical">Canonical link</a></footer>
</article></body></html>"#,
        html_escape::encode_text(text)
    )
}

/// Writes `html` to `dir/name` and returns the path
#[allow(dead_code)]
pub fn write_export(dir: &Path, name: &str, html: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, html)?;
    Ok(path)
}
