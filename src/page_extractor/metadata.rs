//! Post metadata extraction from Medium export HTML
//!
//! Parses the raw export once and derives title, publish timestamp,
//! canonical link, slug and the comment classification. Missing or broken
//! markup degrades the affected field to `None`/`false`; extraction itself
//! never fails.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};
use regex::Regex;
use scraper::{Html, Selector};
use serde::Serialize;
use std::sync::LazyLock;

use crate::utils::{DRAFT_PREFIX, OUTPUT_DATE_FORMAT, percent_decode, url_basename};

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("BUG: hardcoded CSS selector 'title' is invalid"));

static PUBLISHED_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("time.dt-published")
        .expect("BUG: hardcoded CSS selector 'time.dt-published' is invalid")
});

static CANONICAL_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a.p-canonical").expect("BUG: hardcoded CSS selector 'a.p-canonical' is invalid")
});

static BODY_HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[data-field="body"] h3"#)
        .expect("BUG: hardcoded CSS selector '[data-field=\"body\"] h3' is invalid")
});

/// Medium appends `-<hex id>` to every permalink
static HEX_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-[0-9a-f]+$").expect("BUG: hardcoded hex suffix regex is invalid"));

/// ASCII punctuation, whitespace and control characters, plus the Latin-1 controls up to NBSP
static TITLE_SLUG_STRIP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x2F\x3A-\x40\x5B-\x60\x7B-\x{A0}]+")
        .expect("BUG: hardcoded title slug regex is invalid")
});

/// Metadata derived from one exported post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostMetadata {
    pub title: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub canonical_link: Option<String>,
    pub slug: Option<String>,
    /// True when the body carries no `h3`; Medium stores replies this way.
    pub looks_like_comment: bool,
}

impl PostMetadata {
    /// Extract metadata from raw export HTML.
    #[must_use]
    pub fn extract(html: &str) -> Self {
        let document = Html::parse_document(html);

        let title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());

        let published_at = document
            .select(&PUBLISHED_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("datetime"))
            .and_then(parse_timestamp);

        let canonical_link = document
            .select(&CANONICAL_SELECTOR)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(String::from);

        // A link without a usable path segment names nothing; the title takes over
        let slug = canonical_link
            .as_deref()
            .map(slug_from_canonical_link)
            .filter(|s| !s.is_empty())
            .or_else(|| title.as_deref().map(slug_from_title))
            .filter(|s| !s.is_empty());

        let looks_like_comment = document.select(&BODY_HEADING_SELECTOR).next().is_none();

        log::debug!(
            "Extracted metadata: title={title:?}, published={}, slug={slug:?}, comment={looks_like_comment}",
            published_at.is_some()
        );

        Self {
            title,
            published_at,
            canonical_link,
            slug,
            looks_like_comment,
        }
    }

    /// A post is published exactly when it carries a publish timestamp.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Publish time in the given offset, or the machine's local zone.
    #[must_use]
    pub fn local_published_at(&self, offset: Option<FixedOffset>) -> Option<NaiveDateTime> {
        self.published_at.map(|ts| match offset {
            Some(offset) => ts.with_timezone(&offset).naive_local(),
            None => ts.with_timezone(&Local).naive_local(),
        })
    }

    /// `{YYYY-MM-DD|draft}-{slug}`, or `None` when neither slug nor title exists.
    #[must_use]
    pub fn suggested_output_basename(&self, offset: Option<FixedOffset>) -> Option<String> {
        let suffix = self
            .slug
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.title.as_deref().map(slug_from_title))
            .filter(|s| !s.is_empty())?;

        let prefix = match self.local_published_at(offset) {
            Some(local) => local.format(OUTPUT_DATE_FORMAT).to_string(),
            None => DRAFT_PREFIX.to_string(),
        };

        Some(format!("{prefix}-{suffix}"))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            log::warn!("Ignoring unparseable publish timestamp '{raw}': {e}");
            None
        }
    }
}

/// Last path segment of the canonical link, percent-decoded, hex id stripped.
#[must_use]
pub fn slug_from_canonical_link(link: &str) -> String {
    let segment = percent_decode(&url_basename(link));
    HEX_SUFFIX.replace(&segment, "").into_owned()
}

/// Lower-cased title with every run of unsafe characters collapsed to `-`.
#[must_use]
pub fn slug_from_title(title: &str) -> String {
    TITLE_SLUG_STRIP.replace_all(title, "-").to_lowercase()
}
