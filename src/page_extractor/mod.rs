//! Page data extraction functions.
//!
//! Everything read straight from the raw export before any cleanup runs:
//! post metadata and the list of remote image assets.

// Sub-modules
pub mod assets;
pub mod metadata;

// Re-exports for public API
pub use assets::{
    AssetReference, local_asset_path, medium_image_pattern, rewrite_asset_urls, scrape_assets,
};
pub use metadata::{PostMetadata, slug_from_canonical_link, slug_from_title};
