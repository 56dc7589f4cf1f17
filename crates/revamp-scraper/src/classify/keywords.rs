//! Hashtag keywords and free-text location hints.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

pub const MAX_KEYWORDS: usize = 10;

static PIN_LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"📍\s*([^\n|•]+)").expect("valid pin location regex"));
static PHRASE_LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:based|located)\s+in\s+([^\n|•.!]+)").expect("valid location phrase regex")
});

/// Lower-cased hashtags ordered by frequency, ties broken by first
/// appearance, capped at [`MAX_KEYWORDS`].
pub(crate) fn extract_keywords<H: AsRef<str>>(hashtags: &[H]) -> Vec<String> {
    // tag -> (count, first index)
    let mut seen: HashMap<String, (usize, usize)> = HashMap::new();
    for (index, tag) in hashtags.iter().enumerate() {
        let tag = tag.as_ref().trim().trim_start_matches('#').to_lowercase();
        if tag.is_empty() {
            continue;
        }
        seen.entry(tag).or_insert((0, index)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = seen
        .into_iter()
        .map(|(tag, (count, first))| (tag, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(tag, _, _)| tag)
        .collect()
}

/// Location from a `📍` marker, else from "based in" / "located in".
pub(crate) fn extract_location(bio: &str) -> Option<String> {
    [&*PIN_LOCATION_RE, &*PHRASE_LOCATION_RE]
        .into_iter()
        .find_map(|re| re.captures(bio)?.get(1))
        .map(|m| m.as_str().trim().trim_end_matches([',', '.']).trim().to_owned())
        .filter(|location| !location.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_rank_by_frequency_then_first_seen() {
        let tags = ["latte", "Coffee", "brunch", "coffee", "latte", "coffee"];
        assert_eq!(extract_keywords(&tags), vec!["coffee", "latte", "brunch"]);
    }

    #[test]
    fn keywords_are_capped() {
        let tags: Vec<String> = (0..25).map(|i| format!("tag{i}")).collect();
        let keywords = extract_keywords(&tags);
        assert_eq!(keywords.len(), MAX_KEYWORDS);
        assert_eq!(keywords[0], "tag0");
        assert_eq!(keywords[9], "tag9");
    }

    #[test]
    fn keywords_skip_empty_tags() {
        assert_eq!(extract_keywords(&["#", " ", "#Vegan"]), vec!["vegan"]);
        assert!(extract_keywords::<&str>(&[]).is_empty());
    }

    #[test]
    fn location_from_pin_marker() {
        let bio = "Fresh bread daily\n📍 Lisbon, Portugal\nDM to order";
        assert_eq!(extract_location(bio).as_deref(), Some("Lisbon, Portugal"));
    }

    #[test]
    fn location_from_phrase() {
        let bio = "Wedding photographer based in Austin, TX. Travel worldwide";
        assert_eq!(extract_location(bio).as_deref(), Some("Austin, TX"));
    }

    #[test]
    fn pin_marker_takes_precedence() {
        let bio = "Based in Oslo | 📍 Bergen";
        assert_eq!(extract_location(bio).as_deref(), Some("Bergen"));
    }

    #[test]
    fn no_location_hint() {
        assert_eq!(extract_location("just cakes"), None);
        assert_eq!(extract_location("📍 "), None);
    }
}
