//! Jekyll front matter composition

use chrono::FixedOffset;
use serde::Serialize;

use crate::page_extractor::PostMetadata;
use crate::utils::{FRONT_MATTER_DATE_FORMAT, POST_LAYOUT};

/// Front matter block of a Jekyll post.
///
/// `date` is present exactly when the post is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub layout: &'static str,
    pub title: Option<String>,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl FrontMatter {
    /// `offset` pins the timezone of `date`; `None` uses the local zone.
    #[must_use]
    pub fn from_metadata(metadata: &PostMetadata, offset: Option<FixedOffset>) -> Self {
        Self {
            layout: POST_LAYOUT,
            title: metadata.title.clone(),
            published: metadata.is_published(),
            date: metadata
                .local_published_at(offset)
                .map(|local| local.format(FRONT_MATTER_DATE_FORMAT).to_string()),
        }
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// `---\n<yaml>\n---\n\n<markdown>\n`
pub fn compose_document(
    markdown: &str,
    metadata: &PostMetadata,
    offset: Option<FixedOffset>,
) -> Result<String, serde_yaml::Error> {
    let yaml = FrontMatter::from_metadata(metadata, offset).to_yaml()?;
    Ok(format!("---\n{}\n---\n\n{}\n", yaml.trim_end(), markdown.trim_end()))
}
