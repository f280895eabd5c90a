//! Shared constants for the converter
//!
//! Default values mirror the command-line defaults so that library callers
//! and the binary agree on behaviour.

/// Medium serves post images from `cdn-images-<n>.medium.com`
///
/// Only images whose `src` matches this pattern are scraped, rewritten and
/// downloaded. Third-party embeds and already-local images are left alone.
pub const MEDIUM_IMAGE_PATTERN: &str = r"^https://cdn-images-.+\.medium\.com";

/// URL prefix prepended to rewritten image paths
pub const DEFAULT_IMAGE_URL_PREFIX: &str = "/images";

/// Directory (relative to the input file) that downloaded images land in
pub const DEFAULT_IMAGE_DIR: &str = "images";

/// Languages the classifier chooses between unless told otherwise
pub const DEFAULT_LANGUAGES: &[&str] = &["js", "css", "html", "py", "rb", "java", "sql", "go"];

/// Jekyll layout written into every front matter block
pub const POST_LAYOUT: &str = "post";

/// Output name prefix for posts without a publish date
pub const DRAFT_PREFIX: &str = "draft";

/// Front matter `date` format (`YYYY-MM-DD HH:mm`)
pub const FRONT_MATTER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Output file name date format
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension of the per-post image list consumed by `aria2c -i`
pub const IMAGE_LIST_SUFFIX: &str = ".images.txt";
