use serde_json::{json, Value};

use super::*;

fn post_node(id: u64, caption: Option<&str>) -> Value {
    let caption_edges = caption.map_or_else(
        || json!([]),
        |text| json!([{ "node": { "text": text } }]),
    );
    json!({
        "node": {
            "id": id.to_string(),
            "shortcode": format!("sc{id}"),
            "display_url": format!("https://cdn.example.com/p{id}.jpg"),
            "thumbnail_src": format!("https://cdn.example.com/t{id}.jpg"),
            "is_video": false,
            "taken_at_timestamp": 1_700_000_000 + id,
            "edge_liked_by": { "count": id * 10 },
            "edge_media_to_comment": { "count": id },
            "edge_media_to_caption": { "edges": caption_edges }
        }
    })
}

fn full_user(post_count: u64) -> Value {
    let edges: Vec<Value> = (1..=post_count)
        .map(|i| post_node(i, Some("Fresh bread #bakery #Local")))
        .collect();
    json!({
        "username": "the.bakery",
        "full_name": "The Bakery",
        "biography": "Sourdough daily 🍞",
        "profile_pic_url": "https://cdn.example.com/pic.jpg",
        "profile_pic_url_hd": "https://cdn.example.com/pic_hd.jpg",
        "edge_followed_by": { "count": 1200 },
        "edge_follow": { "count": 80 },
        "edge_owner_to_timeline_media": { "count": 340, "edges": edges },
        "is_verified": false,
        "is_business_account": true,
        "category_name": "Bakery",
        "external_url": "https://thebakery.example"
    })
}

fn wrap(user: Value) -> String {
    json!({ "data": { "user": user } }).to_string()
}

#[test]
fn parses_complete_payload() {
    let (profile, posts) = parse_profile("the.bakery", &wrap(full_user(3)), 12).unwrap();
    assert_eq!(profile.username, "the.bakery");
    assert_eq!(profile.full_name.as_deref(), Some("The Bakery"));
    assert_eq!(profile.biography.as_deref(), Some("Sourdough daily 🍞"));
    assert_eq!(
        profile.profile_pic_url.as_deref(),
        Some("https://cdn.example.com/pic_hd.jpg")
    );
    assert_eq!(profile.follower_count, Some(1200));
    assert_eq!(profile.following_count, Some(80));
    assert_eq!(profile.post_count, Some(340));
    assert_eq!(profile.is_verified, Some(false));
    assert_eq!(profile.is_business, Some(true));
    assert_eq!(profile.category.as_deref(), Some("Bakery"));
    assert_eq!(posts.len(), 3);

    let first = &posts[0];
    assert_eq!(first.id.as_deref(), Some("1"));
    assert_eq!(first.caption.as_deref(), Some("Fresh bread #bakery #Local"));
    assert_eq!(first.hashtags, vec!["bakery", "Local"]);
    assert_eq!(first.like_count, Some(10));
    assert_eq!(first.comment_count, Some(1));
    assert_eq!(first.taken_at.map(|t| t.timestamp()), Some(1_700_000_001));
}

#[test]
fn falls_back_to_standard_profile_picture() {
    let mut user = full_user(0);
    user.as_object_mut().unwrap().remove("profile_pic_url_hd");
    let (profile, _) = parse_profile("the.bakery", &wrap(user), 12).unwrap();
    assert_eq!(
        profile.profile_pic_url.as_deref(),
        Some("https://cdn.example.com/pic.jpg")
    );
}

#[test]
fn caps_posts_at_twelve_and_keeps_payload_order() {
    let (_, posts) = parse_profile("the.bakery", &wrap(full_user(20)), 50).unwrap();
    assert_eq!(posts.len(), 12);
    let ids: Vec<_> = posts.iter().filter_map(|p| p.id.clone()).collect();
    let expected: Vec<String> = (1..=12).map(|i: u32| i.to_string()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn honours_lower_configured_post_cap() {
    let (_, posts) = parse_profile("the.bakery", &wrap(full_user(20)), 4).unwrap();
    assert_eq!(posts.len(), 4);
}

#[test]
fn does_not_resort_posts_by_timestamp() {
    let mut older = post_node(1, None);
    older["node"]["taken_at_timestamp"] = json!(100);
    let mut newer = post_node(2, None);
    newer["node"]["taken_at_timestamp"] = json!(200);
    let user = json!({ "edge_owner_to_timeline_media": { "edges": [older, newer] } });
    let (_, posts) = parse_profile("x", &wrap(user), 12).unwrap();
    assert_eq!(posts[0].id.as_deref(), Some("1"));
    assert_eq!(posts[1].id.as_deref(), Some("2"));
}

#[test]
fn empty_biography_is_kept_distinct_from_absent() {
    let mut user = full_user(0);
    user["biography"] = json!("");
    let (profile, _) = parse_profile("the.bakery", &wrap(user), 12).unwrap();
    assert_eq!(profile.biography.as_deref(), Some(""));
}

#[test]
fn null_fields_at_every_depth_become_absent() {
    let user = json!({
        "username": null,
        "full_name": null,
        "biography": null,
        "edge_followed_by": null,
        "edge_follow": { "count": null },
        "edge_owner_to_timeline_media": {
            "count": null,
            "edges": [
                null,
                { "node": null },
                { "node": {
                    "id": null,
                    "display_url": null,
                    "edge_liked_by": null,
                    "edge_media_to_caption": { "edges": [ { "node": null } ] }
                } }
            ]
        },
        "is_verified": null
    });
    let (profile, posts) = parse_profile("requested", &wrap(user), 12).unwrap();
    assert_eq!(profile, ProfileRecord::bare("requested"));
    assert_eq!(posts.len(), 3);
    for post in &posts {
        assert!(post.id.is_none());
        assert!(post.caption.is_none());
        assert!(post.image_url.is_none());
        assert!(post.like_count.is_none());
        assert!(post.hashtags.is_empty());
    }
}

#[test]
fn mistyped_fields_become_absent() {
    let user = json!({
        "username": 42,
        "biography": ["not", "text"],
        "edge_followed_by": { "count": "1,200" },
        "edge_follow": { "count": -3 },
        "is_verified": "yes",
        "edge_owner_to_timeline_media": { "edges": "nope" }
    });
    let (profile, posts) = parse_profile("requested", &wrap(user), 12).unwrap();
    assert_eq!(profile.username, "requested");
    assert!(profile.biography.is_none());
    assert!(profile.follower_count.is_none());
    assert!(profile.following_count.is_none());
    assert!(profile.is_verified.is_none());
    assert!(posts.is_empty());
}

/// Drops every subset of the user-level keys and checks that each dropped
/// key surfaces as `None` and nothing else changes.
#[test]
fn never_fabricates_values_for_any_subset_of_missing_fields() {
    const KEYS: [&str; 10] = [
        "full_name",
        "biography",
        "profile_pic_url",
        "profile_pic_url_hd",
        "edge_followed_by",
        "edge_follow",
        "edge_owner_to_timeline_media",
        "is_verified",
        "category_name",
        "external_url",
    ];

    for mask in 0u32..(1 << KEYS.len()) {
        let mut user = full_user(2);
        let obj = user.as_object_mut().unwrap();
        let dropped: Vec<&str> = KEYS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, k)| *k)
            .collect();
        for key in &dropped {
            obj.remove(*key);
        }

        let (profile, posts) = parse_profile("the.bakery", &wrap(user), 12)
            .unwrap_or_else(|e| panic!("mask {mask:#b} failed: {e}"));
        let gone = |k: &str| dropped.contains(&k);

        assert_eq!(profile.full_name.is_none(), gone("full_name"));
        assert_eq!(profile.biography.is_none(), gone("biography"));
        assert_eq!(
            profile.profile_pic_url.is_none(),
            gone("profile_pic_url") && gone("profile_pic_url_hd")
        );
        assert_eq!(profile.follower_count.is_none(), gone("edge_followed_by"));
        assert_eq!(profile.following_count.is_none(), gone("edge_follow"));
        assert_eq!(
            profile.post_count.is_none(),
            gone("edge_owner_to_timeline_media")
        );
        assert_eq!(posts.is_empty(), gone("edge_owner_to_timeline_media"));
        assert_eq!(profile.is_verified.is_none(), gone("is_verified"));
        assert_eq!(profile.category.is_none(), gone("category_name"));
        assert_eq!(profile.external_url.is_none(), gone("external_url"));
    }
}

#[test]
fn missing_user_object_yields_bare_profile() {
    let (profile, posts) = parse_profile("ghost", r#"{"status":"ok"}"#, 12).unwrap();
    assert_eq!(profile, ProfileRecord::bare("ghost"));
    assert!(posts.is_empty());
}

#[test]
fn rejects_non_json_with_excerpt() {
    let raw = "<html><body>Please wait a few minutes</body></html>";
    let err = parse_profile("x", raw, 12).unwrap_err();
    assert!(matches!(err, ParseError::Malformed { .. }));
    assert_eq!(err.excerpt(), raw);
}

#[test]
fn rejects_top_level_array() {
    let err = parse_profile("x", "[1,2,3]", 12).unwrap_err();
    assert!(matches!(err, ParseError::NotAnObject { .. }));
}

#[test]
fn extract_hashtags_keeps_order_and_case() {
    assert_eq!(
        extract_hashtags("New drop! #Summer #style, #summer"),
        vec!["Summer", "style", "summer"]
    );
    assert!(extract_hashtags("no tags here").is_empty());
}
