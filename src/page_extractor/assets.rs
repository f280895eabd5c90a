//! Image asset scraping and `src` rewriting
//!
//! Both stages read the same untouched export: the scraper collects the
//! remote CDN URLs for the downloader, the rewriter produces a working copy
//! whose matching `<img src>` values point at the local prefix.

use anyhow::{Context, Result, anyhow};
use lol_html::{HtmlRewriter, Settings, element};
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::utils::{MEDIUM_IMAGE_PATTERN, join_url_prefix, url_basename};

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("BUG: hardcoded CSS selector 'img[src]' is invalid"));

static MEDIUM_IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MEDIUM_IMAGE_PATTERN).expect("BUG: hardcoded Medium CDN regex is invalid"));

/// Pattern matching Medium's image CDN hosts
#[must_use]
pub fn medium_image_pattern() -> &'static Regex {
    &MEDIUM_IMAGE_REGEX
}

/// A remote image and the path it is served from after conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetReference {
    pub remote_url: String,
    pub local_path: String,
}

impl AssetReference {
    #[must_use]
    pub fn new(remote_url: impl Into<String>, url_prefix: &str) -> Self {
        let remote_url = remote_url.into();
        let local_path = local_asset_path(&remote_url, url_prefix);
        Self {
            remote_url,
            local_path,
        }
    }

    /// File name the downloader stores the asset under
    #[must_use]
    pub fn file_name(&self) -> String {
        url_basename(&self.remote_url)
    }
}

/// `prefix/basename(url)`
#[must_use]
pub fn local_asset_path(remote_url: &str, url_prefix: &str) -> String {
    join_url_prefix(url_prefix, &url_basename(remote_url))
}

/// Collect matching `<img src>` URLs in document order.
///
/// Assets are keyed by file name: Medium serves one image under several
/// size paths (`max/800/1*x.png`, `max/1024/1*x.png`) that all rewrite to
/// the same local path, so only the first-seen URL is kept.
#[must_use]
pub fn scrape_assets(html: &str, pattern: &Regex, url_prefix: &str) -> Vec<AssetReference> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();

    let assets: Vec<AssetReference> = document
        .select(&IMG_SELECTOR)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| pattern.is_match(src))
        .map(|src| AssetReference::new(src, url_prefix))
        .filter(|asset| seen.insert(asset.file_name()))
        .collect();

    log::debug!("Scraped {} distinct image assets", assets.len());
    assets
}

/// Rewrite every matching `<img src>` to `prefix/basename(src)`.
///
/// Non-matching images pass through untouched. Returns the rewritten HTML
/// and the number of elements changed.
pub fn rewrite_asset_urls(html: &str, pattern: &Regex, url_prefix: &str) -> Result<(String, usize)> {
    let mut output = Vec::with_capacity(html.len());
    let rewrite_count = AtomicUsize::new(0);

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!("img[src]", |el| {
                if let Some(src) = el.get_attribute("src")
                    && pattern.is_match(&src)
                {
                    el.set_attribute("src", &local_asset_path(&src, url_prefix))?;
                    rewrite_count.fetch_add(1, Ordering::Relaxed);
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    rewriter
        .write(html.as_bytes())
        .map_err(|e| anyhow!("Asset rewrite error: {e}"))?;
    rewriter
        .end()
        .map_err(|e| anyhow!("Asset rewrite finalization error: {e}"))?;

    let rewritten = String::from_utf8(output).context("Invalid UTF-8 in rewritten HTML")?;
    let count = rewrite_count.load(Ordering::Relaxed);
    log::debug!("Rewrote {count} image sources to prefix '{url_prefix}'");

    Ok((rewritten, count))
}
