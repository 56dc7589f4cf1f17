use thiserror::Error;

use crate::analyze::Stage;

/// Maximum number of payload characters carried in a [`ParseError`].
pub(crate) const EXCERPT_CHARS: usize = 200;

/// Transport-level failure for a profile or image request.
///
/// Every variant names the `target` (identifier or URL) so callers can
/// report which request failed without extra bookkeeping. The client never
/// retries; retry policy belongs to the caller.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid profile identifier \"{target}\": {reason}")]
    InvalidIdentifier { target: String, reason: String },

    #[error("HTTP error fetching {target}: {source}")]
    Http {
        target: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("not found: {target}")]
    NotFound { target: String },

    #[error("rate limited fetching {target} (retry after {retry_after_secs}s)")]
    RateLimited {
        target: String,
        retry_after_secs: u64,
    },

    #[error("unexpected HTTP status {status} from {target}")]
    UnexpectedStatus { status: u16, target: String },

    #[error(
        "fetch budget exhausted for {target}: {limit} profile fetches per {window_secs}s (retry after {retry_after_secs}s)"
    )]
    BudgetExhausted {
        target: String,
        limit: usize,
        window_secs: u64,
        retry_after_secs: u64,
    },
}

impl FetchError {
    /// The identifier or URL whose request failed.
    #[must_use]
    pub fn target(&self) -> &str {
        match self {
            Self::InvalidIdentifier { target, .. }
            | Self::Http { target, .. }
            | Self::NotFound { target }
            | Self::RateLimited { target, .. }
            | Self::UnexpectedStatus { target, .. }
            | Self::BudgetExhausted { target, .. } => target,
        }
    }
}

/// The profile payload is not a structured document at all. Missing or
/// mistyped fields never produce this error.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("payload for {username} is not valid JSON: {source} (excerpt: {excerpt:?})")]
    Malformed {
        username: String,
        excerpt: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("payload for {username} is not a JSON object (excerpt: {excerpt:?})")]
    NotAnObject { username: String, excerpt: String },
}

impl ParseError {
    #[must_use]
    pub fn excerpt(&self) -> &str {
        match self {
            Self::Malformed { excerpt, .. } | Self::NotAnObject { excerpt, .. } => excerpt,
        }
    }
}

/// Per-image palette failure. Absorbed by the palette extractor and only
/// ever logged.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image download failed: {0}")]
    Download(#[from] FetchError),

    #[error("image at {url} could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: image::ImageError,
    },

    #[error("image worker for {url} did not complete: {reason}")]
    Join { url: String, reason: String },
}

/// Terminal failure of an analysis or of client construction.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("invalid profile endpoint \"{url}\": {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("invalid proxy URL: {source}")]
    InvalidProxy {
        #[source]
        source: reqwest::Error,
    },
}

impl ScraperError {
    /// The pipeline stage a terminal analysis error arose in. `None` for
    /// construction errors, which happen before any analysis starts.
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Fetch(_) => Some(Stage::Fetching),
            Self::Parse(_) => Some(Stage::Parsing),
            Self::ClientBuild(_) | Self::InvalidEndpoint { .. } | Self::InvalidProxy { .. } => {
                None
            }
        }
    }
}

/// First [`EXCERPT_CHARS`] characters of `raw`, cut on a char boundary.
pub(crate) fn excerpt(raw: &str) -> String {
    raw.chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_exposes_target() {
        let err = FetchError::NotFound {
            target: "missing.user".to_owned(),
        };
        assert_eq!(err.target(), "missing.user");
        assert_eq!(err.to_string(), "not found: missing.user");
    }

    #[test]
    fn excerpt_is_bounded_and_char_safe() {
        let raw = "é".repeat(500);
        let cut = excerpt(&raw);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS);
    }

    #[test]
    fn scraper_error_reports_stage() {
        let fetch: ScraperError = FetchError::NotFound {
            target: "x".to_owned(),
        }
        .into();
        assert_eq!(fetch.stage(), Some(Stage::Fetching));

        let parse: ScraperError = ParseError::NotAnObject {
            username: "x".to_owned(),
            excerpt: "[]".to_owned(),
        }
        .into();
        assert_eq!(parse.stage(), Some(Stage::Parsing));
    }
}
