//! Content saving: the conversion pipeline and everything it writes to disk

// Module declarations
mod image_downloader;
pub mod markdown_converter;
mod markdown_saver;

// Re-export public API from image_downloader module
pub use image_downloader::{DownloadOutcome, download_assets};

// Re-export public API from markdown_converter module
pub use markdown_converter::{ConversionResult, convert_post_html, convert_post_html_sync};

// Re-export public API from markdown_saver module
pub use markdown_saver::{format_image_list, save_image_list, save_markdown_content};
