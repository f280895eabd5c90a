//! URL and path helpers shared by the asset stages and the downloader.

use url::Url;

/// Last non-empty path segment of a URL, ignoring query string and fragment.
///
/// Trailing slashes are skipped, so `.../post-1a2b/` yields `post-1a2b`.
/// Falls back to plain string splitting when the input is not an absolute
/// URL, so relative `src` values still yield a usable file name.
#[must_use]
pub fn url_basename(raw: &str) -> String {
    if let Ok(parsed) = Url::parse(raw)
        && let Some(last) = parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|segment| !segment.is_empty()))
    {
        return last.to_string();
    }

    let without_query = raw.split(['?', '#']).next().unwrap_or(raw);
    without_query
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Percent-decode a path segment, keeping the raw text when it is not valid UTF-8.
#[must_use]
pub fn percent_decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

/// Join a URL path prefix and a file name with exactly one `/` between them.
///
/// An empty prefix yields the bare file name; a bare `/` prefix yields a rooted name.
#[must_use]
pub fn join_url_prefix(prefix: &str, basename: &str) -> String {
    let basename = basename.trim_start_matches('/');
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        if prefix.starts_with('/') {
            return format!("/{basename}");
        }
        return basename.to_string();
    }
    format!("{trimmed}/{basename}")
}
