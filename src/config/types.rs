//! Core configuration types for post conversion
//!
//! `ConverterOptions` carries everything one conversion needs; `RenderOptions`
//! is the Markdown style bundle handed to the renderer. The style enums double
//! as CLI value types so the binary and the library share one vocabulary.

use chrono::FixedOffset;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::{DEFAULT_IMAGE_DIR, DEFAULT_IMAGE_URL_PREFIX, DEFAULT_LANGUAGES};

/// Main configuration struct for converting exported posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterOptions {
    /// Language ids (or aliases) the classifier may choose from.
    /// Empty means every supported language.
    pub(crate) languages: Vec<String>,
    pub(crate) detect_languages: bool,
    pub(crate) image_url_prefix: String,
    /// Relative paths resolve against each input file's directory.
    pub(crate) image_dir: PathBuf,
    pub(crate) download_images: bool,
    pub(crate) write_image_list: bool,

    /// Timezone for front matter dates and output names; `None` is the local zone.
    #[serde(skip)]
    pub(crate) utc_offset: Option<FixedOffset>,

    pub(crate) render: RenderOptions,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(|s| (*s).to_string()).collect(),
            detect_languages: true,
            image_url_prefix: DEFAULT_IMAGE_URL_PREFIX.to_string(),
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            download_images: true,
            write_image_list: false,
            utc_offset: None,
            render: RenderOptions::default(),
        }
    }
}

/// Markdown style options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub heading_style: HeadingStyle,
    pub thematic_break: ThematicBreak,
    pub bullet_marker: BulletMarker,
    pub code_block_style: CodeBlockStyle,
    pub fence: CodeFence,
    pub emphasis_delimiter: EmphasisDelimiter,
    pub strong_delimiter: StrongDelimiter,
    pub link_style: LinkStyle,
    pub link_reference_style: LinkReferenceStyle,
    pub figure_style: FigureStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum HeadingStyle {
    /// `## Heading`
    #[default]
    Atx,
    /// Underlined with `===` / `---` (levels 1 and 2 only)
    #[value(alias = "settext")]
    Setext,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ThematicBreak {
    #[value(name = "* * *", alias = "asterisks")]
    Asterisks,
    #[default]
    #[value(name = "---", alias = "dashes")]
    Dashes,
    #[value(name = "___", alias = "underscores")]
    Underscores,
}

impl ThematicBreak {
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            ThematicBreak::Asterisks => "* * *",
            ThematicBreak::Dashes => "---",
            ThematicBreak::Underscores => "___",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BulletMarker {
    #[default]
    #[value(name = "-", alias = "dash")]
    Dash,
    #[value(name = "+", alias = "plus")]
    Plus,
    #[value(name = "*", alias = "asterisk")]
    Asterisk,
}

impl BulletMarker {
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            BulletMarker::Dash => '-',
            BulletMarker::Plus => '+',
            BulletMarker::Asterisk => '*',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CodeBlockStyle {
    #[default]
    Fenced,
    Indented,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CodeFence {
    #[default]
    #[value(name = "```", alias = "backtick")]
    Backtick,
    #[value(name = "~~~", alias = "tilde")]
    Tilde,
}

impl CodeFence {
    #[must_use]
    pub fn fence_char(self) -> char {
        match self {
            CodeFence::Backtick => '`',
            CodeFence::Tilde => '~',
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmphasisDelimiter {
    #[default]
    #[value(name = "_", alias = "underscore")]
    Underscore,
    #[value(name = "*", alias = "asterisk")]
    Asterisk,
}

impl EmphasisDelimiter {
    #[must_use]
    pub fn delimiter(self) -> &'static str {
        match self {
            EmphasisDelimiter::Underscore => "_",
            EmphasisDelimiter::Asterisk => "*",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrongDelimiter {
    #[default]
    #[value(name = "**", alias = "asterisks")]
    Asterisks,
    #[value(name = "__", alias = "underscores")]
    Underscores,
}

impl StrongDelimiter {
    #[must_use]
    pub fn delimiter(self) -> &'static str {
        match self {
            StrongDelimiter::Asterisks => "**",
            StrongDelimiter::Underscores => "__",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LinkStyle {
    #[default]
    #[value(alias = "inline")]
    Inlined,
    #[value(alias = "reference")]
    Referenced,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LinkReferenceStyle {
    #[default]
    Full,
    Collapsed,
    Shortcut,
}

/// How a `<figure>` with an image and a caption is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FigureStyle {
    /// `![caption](src "title")`
    Alt,
    /// `![alt](src "caption")`
    Title,
    /// Literal `<figure>` HTML block, caption markup kept verbatim
    #[default]
    #[value(alias = "no")]
    Structured,
}
