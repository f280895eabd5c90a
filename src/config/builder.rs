//! Builder for `ConverterOptions`
//!
//! Every field has a default, so the builder needs no type states; `build()`
//! only validates the language allow-list against the classifier.

use chrono::FixedOffset;
use std::path::PathBuf;

use super::types::{ConverterOptions, RenderOptions};
use crate::content_saver::markdown_converter::custom_handlers::language_inference::canonical_language;
use crate::errors::{ConvertError, ConvertResult};

#[derive(Debug, Clone, Default)]
pub struct ConverterOptionsBuilder {
    pub(crate) options: ConverterOptions,
}

impl ConverterOptions {
    #[must_use]
    pub fn builder() -> ConverterOptionsBuilder {
        ConverterOptionsBuilder::default()
    }
}

impl ConverterOptionsBuilder {
    /// Restrict language detection to these ids or aliases (empty = all)
    #[must_use]
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn detect_languages(mut self, enabled: bool) -> Self {
        self.options.detect_languages = enabled;
        self
    }

    #[must_use]
    pub fn image_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.image_url_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.image_dir = dir.into();
        self
    }

    #[must_use]
    pub fn download_images(mut self, enabled: bool) -> Self {
        self.options.download_images = enabled;
        self
    }

    #[must_use]
    pub fn write_image_list(mut self, enabled: bool) -> Self {
        self.options.write_image_list = enabled;
        self
    }

    #[must_use]
    pub fn utc_offset(mut self, offset: Option<FixedOffset>) -> Self {
        self.options.utc_offset = offset;
        self
    }

    #[must_use]
    pub fn render(mut self, render: RenderOptions) -> Self {
        self.options.render = render;
        self
    }

    /// Validate and produce the options.
    ///
    /// # Errors
    ///
    /// Returns `ConvertError::UnknownLanguage` for an id the classifier does not know.
    pub fn build(self) -> ConvertResult<ConverterOptions> {
        if let Some(unknown) = self
            .options
            .languages
            .iter()
            .find(|id| canonical_language(id).is_none())
        {
            return Err(ConvertError::UnknownLanguage(unknown.clone()));
        }
        Ok(self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FigureStyle;
    use std::path::Path;

    #[test]
    fn test_defaults_match_cli() {
        let options = ConverterOptions::builder().build().expect("defaults are valid");
        assert_eq!(options.image_url_prefix(), "/images");
        assert_eq!(options.image_dir(), Path::new("images"));
        assert!(options.detect_languages());
        assert!(options.languages().iter().any(|l| l == "py"));
        assert_eq!(options.render().figure_style, FigureStyle::Structured);
    }

    #[test]
    fn test_unknown_language_rejected() {
        let result = ConverterOptions::builder()
            .languages(["js", "klingon"])
            .build();
        assert!(matches!(result, Err(ConvertError::UnknownLanguage(ref l)) if l == "klingon"));
    }

    #[test]
    fn test_download_dir_relative_and_absolute() {
        let relative = ConverterOptions::builder().build().expect("valid");
        assert_eq!(
            relative.download_dir_for(Path::new("/export/posts"), "2020-05-01-hello"),
            PathBuf::from("/export/posts/images/2020-05-01-hello")
        );

        let absolute = ConverterOptions::builder()
            .image_dir("/srv/site/images")
            .build()
            .expect("valid");
        assert_eq!(
            absolute.download_dir_for(Path::new("/export/posts"), "draft-x"),
            PathBuf::from("/srv/site/images/draft-x")
        );
    }
}
