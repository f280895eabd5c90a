pub mod config;
pub mod content_saver;
pub mod errors;
pub mod orchestrator;
pub mod page_extractor;
pub mod utils;

pub use config::{ConverterOptions, ConverterOptionsBuilder, FigureStyle, RenderOptions};
pub use content_saver::markdown_converter::{
    LanguageAllowList, cleanup_post_html, detect_code_block_languages, render_markdown,
    supported_language_ids,
};
pub use content_saver::{
    ConversionResult, DownloadOutcome, convert_post_html, convert_post_html_sync, download_assets,
};
pub use errors::{ConvertError, ConvertResult};
pub use orchestrator::{BatchReport, FileConversion, FileStatus, convert_file, convert_files};
pub use page_extractor::{AssetReference, PostMetadata};
