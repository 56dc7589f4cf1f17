//! Tolerant accessors over the raw profile payload.
//!
//! ## Observed shape of `web_profile_info`
//!
//! ```text
//! { "data": { "user": {
//!     "username", "full_name", "biography",
//!     "profile_pic_url", "profile_pic_url_hd",
//!     "edge_followed_by": { "count" }, "edge_follow": { "count" },
//!     "edge_owner_to_timeline_media": { "count", "edges": [ { "node": {
//!         "id", "shortcode", "display_url", "thumbnail_src", "is_video",
//!         "taken_at_timestamp",
//!         "edge_liked_by": { "count" }, "edge_media_to_comment": { "count" },
//!         "edge_media_to_caption": { "edges": [ { "node": { "text" } } ] }
//!     } } ] },
//!     "is_verified", "is_business_account", "category_name", "external_url"
//! } } }
//! ```
//!
//! Any key can be missing or `null`, and the endpoint has been seen to
//! return counts as strings during partial outages. Rather than a typed
//! `serde` model (where one mistyped field rejects the whole document), the
//! parser walks a [`serde_json::Value`] through these helpers, each of which
//! answers `None` for anything missing, `null`, or of the wrong type.

use serde_json::Value;

/// Follows `keys` through nested objects.
pub(crate) fn at<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .try_fold(value, |v, k| v.as_object().and_then(|o| o.get(*k)))
        .filter(|v| !v.is_null())
}

pub(crate) fn str_at(value: &Value, keys: &[&str]) -> Option<String> {
    at(value, keys).and_then(Value::as_str).map(str::to_owned)
}

/// Non-negative integer. Negative or fractional numbers are treated as absent.
pub(crate) fn u64_at(value: &Value, keys: &[&str]) -> Option<u64> {
    at(value, keys).and_then(Value::as_u64)
}

pub(crate) fn i64_at(value: &Value, keys: &[&str]) -> Option<i64> {
    at(value, keys).and_then(Value::as_i64)
}

pub(crate) fn bool_at(value: &Value, keys: &[&str]) -> Option<bool> {
    at(value, keys).and_then(Value::as_bool)
}

/// Array elements at `keys`; an absent or non-array value yields an empty slice.
pub(crate) fn array_at<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    at(value, keys)
        .and_then(Value::as_array)
        .map_or(&[], Vec::as_slice)
}

/// Identifiers arrive as strings, but older payloads used bare numbers.
pub(crate) fn id_at(value: &Value, keys: &[&str]) -> Option<String> {
    match at(value, keys)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
