use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Hard cap on recent posts kept per profile. Posts beyond this are dropped,
/// never paginated.
pub const MAX_POSTS: usize = 12;

/// A public profile as returned by the profile endpoint.
///
/// Every field except `username` may be absent in the source payload and is
/// then `None`. A present-but-empty string (e.g. a blank biography) stays
/// `Some("")` so callers can tell "no bio" from "bio not returned".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub username: String,
    pub full_name: Option<String>,
    pub biography: Option<String>,
    /// HD picture when available, otherwise the standard-resolution one.
    pub profile_pic_url: Option<String>,
    pub follower_count: Option<u64>,
    pub following_count: Option<u64>,
    pub post_count: Option<u64>,
    pub is_verified: Option<bool>,
    pub is_business: Option<bool>,
    /// Category label assigned by the source platform, e.g. `"Restaurant"`.
    pub category: Option<String>,
    pub external_url: Option<String>,
}

impl ProfileRecord {
    /// A record carrying only the identifier; every optional field is `None`.
    #[must_use]
    pub fn bare(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            full_name: None,
            biography: None,
            profile_pic_url: None,
            follower_count: None,
            following_count: None,
            post_count: None,
            is_verified: None,
            is_business: None,
            category: None,
            external_url: None,
        }
    }
}

/// One recent post, in the order the source returned it (most recent first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: Option<String>,
    pub shortcode: Option<String>,
    pub caption: Option<String>,
    /// Full-size display image. Videos carry their cover frame here.
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub is_video: Option<bool>,
    pub like_count: Option<u64>,
    pub comment_count: Option<u64>,
    pub taken_at: Option<DateTime<Utc>>,
    /// Hashtags from the caption without the leading `#`, in order of appearance.
    pub hashtags: Vec<String>,
}
