//! Conversion from the raw profile payload to [`ProfileRecord`] and
//! [`PostRecord`]s.
//!
//! Field access never fails: anything missing, `null`, or mistyped becomes
//! `None` (or an empty list). The only failures are a body that is not JSON
//! at all, or JSON whose top level is not an object.

use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;
use revamp_core::{PostRecord, ProfileRecord, MAX_POSTS};
use serde_json::Value;

use crate::error::{excerpt, ParseError};
use crate::types::{array_at, at, bool_at, i64_at, id_at, str_at, u64_at};

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

/// Parses a raw profile payload.
///
/// `username` is the identifier that was requested; it fills
/// [`ProfileRecord::username`] when the payload omits it. At most
/// `min(max_posts, 12)` posts are returned, in payload order.
///
/// # Errors
///
/// - [`ParseError::Malformed`] if `raw` is not valid JSON.
/// - [`ParseError::NotAnObject`] if the top-level JSON value is not an object.
pub fn parse_profile(
    username: &str,
    raw: &str,
    max_posts: usize,
) -> Result<(ProfileRecord, Vec<PostRecord>), ParseError> {
    let doc: Value = serde_json::from_str(raw).map_err(|source| ParseError::Malformed {
        username: username.to_owned(),
        excerpt: excerpt(raw),
        source,
    })?;

    if !doc.is_object() {
        return Err(ParseError::NotAnObject {
            username: username.to_owned(),
            excerpt: excerpt(raw),
        });
    }

    let Some(user) = at(&doc, &["data", "user"]) else {
        tracing::warn!(username, "payload has no user object; all profile fields absent");
        return Ok((ProfileRecord::bare(username), Vec::new()));
    };

    let profile = ProfileRecord {
        username: str_at(user, &["username"]).unwrap_or_else(|| username.to_owned()),
        full_name: str_at(user, &["full_name"]),
        biography: str_at(user, &["biography"]),
        profile_pic_url: str_at(user, &["profile_pic_url_hd"])
            .or_else(|| str_at(user, &["profile_pic_url"])),
        follower_count: u64_at(user, &["edge_followed_by", "count"]),
        following_count: u64_at(user, &["edge_follow", "count"]),
        post_count: u64_at(user, &["edge_owner_to_timeline_media", "count"]),
        is_verified: bool_at(user, &["is_verified"]),
        is_business: bool_at(user, &["is_business_account"]),
        category: str_at(user, &["category_name"]),
        external_url: str_at(user, &["external_url"]),
    };

    let cap = max_posts.min(MAX_POSTS);
    let posts = array_at(user, &["edge_owner_to_timeline_media", "edges"])
        .iter()
        .take(cap)
        .map(|edge| parse_post(at(edge, &["node"])))
        .collect();

    Ok((profile, posts))
}

fn parse_post(node: Option<&Value>) -> PostRecord {
    let Some(node) = node else {
        return PostRecord {
            id: None,
            shortcode: None,
            caption: None,
            image_url: None,
            thumbnail_url: None,
            is_video: None,
            like_count: None,
            comment_count: None,
            taken_at: None,
            hashtags: Vec::new(),
        };
    };

    let caption = array_at(node, &["edge_media_to_caption", "edges"])
        .first()
        .and_then(|edge| str_at(edge, &["node", "text"]));
    let hashtags = caption.as_deref().map(extract_hashtags).unwrap_or_default();

    PostRecord {
        id: id_at(node, &["id"]),
        shortcode: str_at(node, &["shortcode"]),
        caption,
        image_url: str_at(node, &["display_url"]),
        thumbnail_url: str_at(node, &["thumbnail_src"]),
        is_video: bool_at(node, &["is_video"]),
        like_count: u64_at(node, &["edge_liked_by", "count"])
            .or_else(|| u64_at(node, &["edge_media_preview_like", "count"])),
        comment_count: u64_at(node, &["edge_media_to_comment", "count"]),
        taken_at: i64_at(node, &["taken_at_timestamp"])
            .and_then(|secs| DateTime::from_timestamp(secs, 0)),
        hashtags,
    }
}

/// Hashtags in `text` without the leading `#`, in order of appearance.
#[must_use]
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str().to_owned()))
        .collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
