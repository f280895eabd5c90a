//! Getter methods for `ConverterOptions`

use chrono::FixedOffset;
use std::path::{Path, PathBuf};

use super::types::{ConverterOptions, RenderOptions};

impl ConverterOptions {
    #[must_use]
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    #[must_use]
    pub fn detect_languages(&self) -> bool {
        self.detect_languages
    }

    #[must_use]
    pub fn image_url_prefix(&self) -> &str {
        &self.image_url_prefix
    }

    #[must_use]
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    #[must_use]
    pub fn download_images(&self) -> bool {
        self.download_images
    }

    #[must_use]
    pub fn write_image_list(&self) -> bool {
        self.write_image_list
    }

    #[must_use]
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset
    }

    #[must_use]
    pub fn render(&self) -> &RenderOptions {
        &self.render
    }

    /// Directory the images of one post are downloaded into.
    ///
    /// `<image_dir>/<output basename>`, with a relative `image_dir` resolved
    /// against the directory holding the input file.
    #[must_use]
    pub fn download_dir_for(&self, input_dir: &Path, output_basename: &str) -> PathBuf {
        if self.image_dir.is_absolute() {
            self.image_dir.join(output_basename)
        } else {
            input_dir.join(&self.image_dir).join(output_basename)
        }
    }
}
