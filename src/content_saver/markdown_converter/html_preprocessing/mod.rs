//! HTML preprocessing ahead of Markdown rendering.
//!
//! - `structural_cleanup`: body-region extraction and the export quirk rewrites
//! - `code_language`: classifier-driven `language-*` tagging of code blocks

pub mod code_language;
pub mod structural_cleanup;

pub use code_language::detect_code_block_languages;
pub use structural_cleanup::cleanup_post_html;
