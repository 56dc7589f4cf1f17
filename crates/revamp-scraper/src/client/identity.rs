//! Browser identity presented to the profile endpoint, plus identifier and
//! host helpers.

use crate::error::FetchError;

/// Desktop browser user agents rotated across requests.
pub const USER_AGENTS: [&str; 5] = [
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_1) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
];

/// Web app ID the profile endpoint expects from its own frontend.
pub(super) const IG_APP_ID: &str = "936619743392459";
pub(super) const ASBD_ID: &str = "129477";
pub(super) const WEB_ORIGIN: &str = "https://www.instagram.com";

const MAX_IDENTIFIER_LEN: usize = 30;

/// Validates a profile identifier and returns it without a leading `@`.
///
/// Accepts 1–30 ASCII alphanumerics, `.` and `_`.
///
/// # Errors
///
/// Returns [`FetchError::InvalidIdentifier`] for anything else.
pub fn normalize_identifier(raw: &str) -> Result<&str, FetchError> {
    let trimmed = raw.trim();
    let id = trimmed.strip_prefix('@').unwrap_or(trimmed);

    let invalid = |reason: &str| FetchError::InvalidIdentifier {
        target: raw.to_owned(),
        reason: reason.to_owned(),
    };

    if id.is_empty() {
        return Err(invalid("identifier is empty"));
    }
    if id.len() > MAX_IDENTIFIER_LEN {
        return Err(invalid("identifier is longer than 30 characters"));
    }
    if let Some(bad) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '.' || *c == '_'))
    {
        return Err(invalid(&format!("unexpected character {bad:?}")));
    }
    Ok(id)
}

/// Hostname of `url` for budgeting and logs; falls back to the full string.
pub(super) fn extract_host(url: &reqwest::Url) -> String {
    url.host_str()
        .map_or_else(|| url.as_str().to_owned(), str::to_owned)
}

/// Referer the web frontend would send when viewing `username`'s page.
pub(super) fn profile_referer(username: &str) -> String {
    format!("{WEB_ORIGIN}/{username}/")
}
