//! Error types for post conversion
//!
//! A single document's failure never escapes into its siblings: the
//! orchestrator records each `ConvertError` against the file it came from
//! and moves on.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Error types for conversion operations
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Document is a reply/comment stub rather than a post
    #[error("Not a post, skipping: {}", file.display())]
    NotAPost { file: PathBuf },

    /// Neither a slug nor a title could be derived
    #[error("Unable to derive an output name for '{}': no usable canonical link or title", file.display())]
    NamingFailed { file: PathBuf },

    /// Selector, rewriter or serializer failure
    #[error("HTML processing failed: {0}")]
    Parse(String),

    /// HTML to Markdown engine failure
    #[error("Markdown rendering failed: {0}")]
    Render(String),

    /// Front matter serialization failed
    #[error("Front matter serialization failed: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    /// Unknown language id in the detection allow-list
    #[error("Unsupported language '{0}' (see --list-languages)")]
    UnknownLanguage(String),

    /// Asset download failed
    #[error("Download of {url} failed: {message}")]
    Download { url: String, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<anyhow::Error> for ConvertError {
    fn from(error: anyhow::Error) -> Self {
        ConvertError::Parse(format!("{error:#}"))
    }
}

impl ConvertError {
    /// Classification skips are reported but are not failures
    #[must_use]
    pub fn is_skip(&self) -> bool {
        matches!(self, ConvertError::NotAPost { .. })
    }
}
