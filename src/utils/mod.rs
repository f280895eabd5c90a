pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{join_url_prefix, percent_decode, url_basename};
