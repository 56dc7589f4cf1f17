//! Ordered rule tables for business category and brand tone.
//!
//! Both tables are evaluated top to bottom and the first matching rule
//! wins, so a bio mentioning both "yoga" and "photography" is `Fitness`
//! because fitness sits earlier in [`CATEGORY_RULES`].

use std::sync::LazyLock;

use regex::Regex;
use revamp_core::{BrandTone, BusinessType};

pub struct CategoryRule {
    pub category: BusinessType,
    pub keywords: &'static [&'static str],
}

pub const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: BusinessType::Restaurant,
        keywords: &[
            "food", "menu", "restaurant", "cafe", "café", "dining", "chef", "cuisine", "bakery",
            "brunch", "catering",
        ],
    },
    CategoryRule {
        category: BusinessType::Fashion,
        keywords: &[
            "fashion", "style", "clothing", "boutique", "wear", "outfit", "collection", "apparel",
        ],
    },
    CategoryRule {
        category: BusinessType::Beauty,
        keywords: &[
            "beauty", "salon", "makeup", "hair", "skincare", "spa", "cosmetics", "nails", "lashes",
        ],
    },
    CategoryRule {
        category: BusinessType::Fitness,
        keywords: &[
            "fitness", "gym", "workout", "training", "yoga", "pilates", "health", "wellness",
            "personal trainer",
        ],
    },
    CategoryRule {
        category: BusinessType::Photography,
        keywords: &[
            "photography", "photographer", "photo", "shoot", "camera", "portrait",
        ],
    },
    CategoryRule {
        category: BusinessType::RealEstate,
        keywords: &["real estate", "property", "realtor", "homes", "listing", "rent"],
    },
    CategoryRule {
        category: BusinessType::Consulting,
        keywords: &[
            "consulting", "consultant", "advisor", "strategy", "business", "coach",
        ],
    },
    CategoryRule {
        category: BusinessType::Art,
        keywords: &[
            "art", "artist", "gallery", "painting", "design", "creative", "illustration",
        ],
    },
    CategoryRule {
        category: BusinessType::Education,
        keywords: &["education", "course", "learn", "workshop", "tutorial", "tutor"],
    },
    CategoryRule {
        category: BusinessType::Tech,
        keywords: &[
            "tech", "software", "app", "digital", "development", "coding", "startup",
        ],
    },
];

pub struct ToneRule {
    pub tone: BrandTone,
    pub keywords: &'static [&'static str],
    /// Emoji or repeated exclamation marks also satisfy the rule.
    pub expressive: bool,
}

pub const TONE_RULES: &[ToneRule] = &[
    ToneRule {
        tone: BrandTone::Luxury,
        keywords: &[
            "luxury", "luxurious", "premium", "exclusive", "vip", "elite", "bespoke", "couture",
        ],
        expressive: false,
    },
    ToneRule {
        tone: BrandTone::Professional,
        keywords: &[
            "professional", "expert", "certified", "licensed", "qualified", "accredited",
            "official", "established",
        ],
        expressive: false,
    },
    ToneRule {
        tone: BrandTone::Playful,
        keywords: &["fun", "yay", "omg", "lol", "party", "love"],
        expressive: true,
    },
    ToneRule {
        tone: BrandTone::Casual,
        keywords: &["casual", "chill", "relax", "easy", "vibes", "hey", "cozy", "laid back"],
        expressive: false,
    },
];

/// Compiles a keyword list into one case-insensitive, whole-word regex.
/// Multi-word keywords tolerate any whitespace between words, and a
/// trailing plural `s`/`es` is accepted.
pub(crate) fn keyword_regex(keywords: &[&str]) -> Regex {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|k| {
            k.split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect();
    let pattern = format!(r"(?i)\b(?:{})(?:e?s)?\b", alternatives.join("|"));
    Regex::new(&pattern).expect("keyword lists compile to valid regexes")
}

static CATEGORY_MATCHERS: LazyLock<Vec<(BusinessType, Regex)>> = LazyLock::new(|| {
    CATEGORY_RULES
        .iter()
        .map(|rule| (rule.category, keyword_regex(rule.keywords)))
        .collect()
});

static TONE_MATCHERS: LazyLock<Vec<(&'static ToneRule, Regex)>> = LazyLock::new(|| {
    TONE_RULES
        .iter()
        .map(|rule| (rule, keyword_regex(rule.keywords)))
        .collect()
});

/// First category whose keywords occur in any of `texts`, else `General`.
pub(crate) fn match_category(texts: &[&str]) -> BusinessType {
    CATEGORY_MATCHERS
        .iter()
        .find(|(_, re)| texts.iter().any(|t| re.is_match(t)))
        .map_or(BusinessType::General, |(category, _)| *category)
}

/// First tone rule satisfied by `text`, else `Unknown`.
pub(crate) fn match_tone(text: &str) -> BrandTone {
    let expressive = is_expressive(text);
    TONE_MATCHERS
        .iter()
        .find(|(rule, re)| (rule.expressive && expressive) || re.is_match(text))
        .map_or(BrandTone::Unknown, |(rule, _)| rule.tone)
}

fn is_expressive(text: &str) -> bool {
    text.chars().any(is_decorative_emoji) || text.matches('!').count() >= 2
}

/// Pictographic emoji, excluding the handful used as plain markers for
/// location or contact details.
fn is_decorative_emoji(c: char) -> bool {
    const MARKERS: [char; 8] = ['📍', '📞', '📧', '📩', '📲', '☎', '👇', '⬇'];
    if MARKERS.contains(&c) {
        return false;
    }
    matches!(
        u32::from(c),
        0x1F300..=0x1FAFF | 0x2600..=0x26FF | 0x2728 | 0x2764
    )
}
