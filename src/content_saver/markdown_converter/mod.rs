//! Medium export HTML to Jekyll post conversion pipeline
//!
//! Stages run strictly in order, each feeding the next:
//!
//! 1. Metadata extraction (comment classification, output naming)
//! 2. Asset scraping over the untouched export
//! 3. Asset URL rewriting on a working copy
//! 4. Structural cleanup of the body region
//! 5. Code-language tagging
//! 6. Markdown rendering with custom element rules
//! 7. Front matter composition
//!
//! # Usage
//!
//! ```rust
//! # use std::path::Path;
//! # use medium_to_jekyll::config::ConverterOptions;
//! # use medium_to_jekyll::content_saver::markdown_converter::convert_post_html_sync;
//! let html = r#"<html><head><title>Hello</title></head><body><article>
//! <section data-field="body"><section><h3>Hello</h3><p>Some <strong>text</strong>.</p></section></section>
//! <a class="p-canonical" href="https://medium.com/@me/hello-1a2b3c"></a>
//! </article></body></html>"#;
//!
//! let result = convert_post_html_sync(html, Path::new("draft_hello.html"), &ConverterOptions::default())?;
//! assert_eq!(result.output_basename, "draft-hello");
//! assert!(result.content.starts_with("---\nlayout: post\n"));
//! assert!(result.content.contains("Some **text**."));
//! # Ok::<(), medium_to_jekyll::ConvertError>(())
//! ```

pub mod custom_handlers;
pub mod front_matter;
pub mod html_preprocessing;
pub mod html_to_markdown;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

pub use custom_handlers::create_converter;
pub use custom_handlers::language_inference::{
    LanguageAllowList, canonical_language, infer_language, supported_language_ids,
};
pub use front_matter::{FrontMatter, compose_document};
pub use html_preprocessing::{cleanup_post_html, detect_code_block_languages};
pub use html_to_markdown::{MarkdownNormalizer, render_markdown};

use crate::config::ConverterOptions;
use crate::errors::{ConvertError, ConvertResult};
use crate::page_extractor::{
    AssetReference, PostMetadata, medium_image_pattern, rewrite_asset_urls, scrape_assets,
};

/// Everything one converted post produces
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    /// `{YYYY-MM-DD|draft}-{slug}`, without extension
    pub output_basename: String,
    /// Front matter plus Markdown body
    pub content: String,
    /// Remote images referenced by the post, first-seen order
    pub assets: Vec<AssetReference>,
    pub metadata: PostMetadata,
}

/// Convert one exported post synchronously (blocking)
///
/// `source` only labels errors; nothing is read from disk.
///
/// # Errors
///
/// - [`ConvertError::NotAPost`] when the document looks like a reply
/// - [`ConvertError::NamingFailed`] when neither slug nor title exists
/// - [`ConvertError::Parse`], [`ConvertError::Render`] or
///   [`ConvertError::FrontMatter`] when a stage fails
pub fn convert_post_html_sync(
    html: &str,
    source: &Path,
    options: &ConverterOptions,
) -> ConvertResult<ConversionResult> {
    // Stage 1: metadata, classification and naming
    let metadata = PostMetadata::extract(html);
    if metadata.looks_like_comment {
        return Err(ConvertError::NotAPost {
            file: source.to_path_buf(),
        });
    }
    let output_basename = metadata
        .suggested_output_basename(options.utc_offset())
        .ok_or_else(|| ConvertError::NamingFailed {
            file: source.to_path_buf(),
        })?;

    // Stages 2-3 read the same snapshot; the rewrite works on a copy
    let pattern = medium_image_pattern();
    let assets = scrape_assets(html, pattern, options.image_url_prefix());
    let (rewritten, _) = rewrite_asset_urls(html, pattern, options.image_url_prefix())?;

    // Stage 4
    let body = cleanup_post_html(&rewritten, None)?;

    // Stage 5
    let body = if options.detect_languages() {
        detect_code_block_languages(&body, &LanguageAllowList::new(options.languages()))
    } else {
        body
    };

    // Stage 6
    let markdown = render_markdown(&body, options.render())
        .map_err(|e| ConvertError::Render(format!("{e:#}")))?;

    // Stage 7
    let content = compose_document(&markdown, &metadata, options.utc_offset())?;

    log::info!(
        "Converted '{}' -> {output_basename}.md ({} assets)",
        source.display(),
        assets.len()
    );

    Ok(ConversionResult {
        output_basename,
        content,
        assets,
        metadata,
    })
}

/// Convert one exported post on the blocking thread pool
///
/// The pipeline is CPU-bound DOM work, so it runs under `spawn_blocking`
/// rather than on the async executor.
pub async fn convert_post_html(
    html: &str,
    source: &Path,
    options: &ConverterOptions,
) -> ConvertResult<ConversionResult> {
    let html = Arc::<str>::from(html);
    let source = PathBuf::from(source);
    let options = options.clone();

    tokio::task::spawn_blocking(move || convert_post_html_sync(&html, &source, &options))
        .await
        .map_err(|e| ConvertError::Parse(format!("Conversion task panicked: {e}")))?
}
