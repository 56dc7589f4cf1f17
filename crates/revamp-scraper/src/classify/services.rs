//! Service extraction against a controlled vocabulary.
//!
//! Bio text is cut into delimiter-separated segments ("Cuts | Color |
//! Lashes") and each segment is scanned for vocabulary terms in reading
//! order. Captions contribute only through verb + noun phrases such as
//! "book a facial" or "order catering". Only canonical vocabulary terms are
//! ever emitted.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of services reported.
pub const MAX_SERVICES: usize = 10;

/// `(canonical term, regex fragment)`; fragments are matched whole-word and
/// case-insensitively.
const VOCABULARY: &[(&str, &str)] = &[
    ("catering", r"catering"),
    ("delivery", r"deliver(?:y|ies)"),
    ("takeout", r"take-?\s?out"),
    ("meal prep", r"meal\s+prep"),
    ("custom cakes", r"custom\s+cakes?"),
    ("events", r"(?:private|corporate|special)\s+events?|event\s+(?:planning|hire)"),
    ("classes", r"classes|(?:group|private|online)\s+class"),
    ("personal training", r"personal\s+training"),
    ("coaching", r"(?:online\s+)?coaching"),
    ("workshops", r"workshops?"),
    ("retreats", r"retreats?"),
    ("haircuts", r"hair\s?cuts?"),
    ("hair color", r"hair\s+colou?r(?:ing)?"),
    ("makeup", r"make-?\s?up"),
    ("nails", r"nails?|manicures?|pedicures?"),
    ("lashes", r"lash(?:es)?(?:\s+extensions?)?"),
    ("brows", r"brows?"),
    ("facials", r"facials?"),
    ("massage", r"massages?"),
    ("skincare", r"skin\s?care"),
    ("tattoos", r"tattoos?"),
    ("photoshoots", r"photo\s?shoots?"),
    ("weddings", r"weddings?"),
    ("portraits", r"portraits?"),
    ("headshots", r"headshots?"),
    ("consultations", r"consult(?:ation)?s?"),
    ("web design", r"web\s*design"),
    ("branding", r"branding"),
    ("custom orders", r"custom\s+orders?"),
    ("alterations", r"alterations?"),
    ("styling", r"styling"),
    ("tutoring", r"tutoring"),
    ("courses", r"courses?"),
    ("repairs", r"repairs?"),
];

/// Bare words that name a service only when they stand alone as a short list
/// item ("Cuts | Color"), never inside running prose ("world class", "every
/// color").
const LIST_ITEM_VOCABULARY: &[(&str, &str)] = &[
    ("classes", r"class"),
    ("haircuts", r"cuts?"),
    ("hair color", r"colou?r(?:ing)?"),
    ("events", r"events?"),
];

/// Longest candidate, in words, still treated as a list item.
const LIST_ITEM_MAX_WORDS: usize = 2;

fn compile(vocabulary: &[(&'static str, &str)]) -> Vec<(&'static str, Regex)> {
    vocabulary
        .iter()
        .map(|(canonical, fragment)| {
            let re = Regex::new(&format!(r"(?i)\b(?:{fragment})\b"))
                .expect("service vocabulary compiles");
            (*canonical, re)
        })
        .collect()
}

static VOCABULARY_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile(VOCABULARY));
static LIST_ITEM_MATCHERS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile(LIST_ITEM_VOCABULARY));

static SEGMENT_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[|•·✓✔,/;\n]|\s-\s|\s–\s").expect("valid segment delimiter regex")
});

static VERB_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:book|offer(?:ing)?|try|join|order|schedule|get|grab|sign\s+up\s+for)\s+(?:(?:a|an|the|your|our|my|some)\s+)?((?:[\w'-]+\s+){0,2}[\w'-]+)",
    )
    .expect("valid verb phrase regex")
});

/// Services named in `biography` and `captions`, deduplicated in order of
/// first appearance and capped at [`MAX_SERVICES`].
pub(crate) fn extract_services(biography: Option<&str>, captions: &[&str]) -> Vec<String> {
    let mut services: Vec<String> = Vec::new();

    let bio_segments = biography
        .into_iter()
        .flat_map(|bio| SEGMENT_SPLIT_RE.split(bio));
    let caption_phrases = captions.iter().flat_map(|caption| {
        VERB_PHRASE_RE
            .captures_iter(*caption)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
    });

    for candidate in bio_segments.chain(caption_phrases) {
        for term in vocabulary_terms(candidate) {
            if services.len() >= MAX_SERVICES {
                return services;
            }
            if !services.iter().any(|s| s == term) {
                services.push(term.to_owned());
            }
        }
    }

    services
}

/// Vocabulary terms in `text`, ordered by where they occur.
fn vocabulary_terms(text: &str) -> Vec<&'static str> {
    let list_item = text.split_whitespace().count() <= LIST_ITEM_MAX_WORDS;
    let list_matchers = LIST_ITEM_MATCHERS.iter().filter(|_| list_item);
    let mut hits: Vec<(usize, &'static str)> = VOCABULARY_MATCHERS
        .iter()
        .chain(list_matchers)
        .filter_map(|(canonical, re)| re.find(text).map(|m| (m.start(), *canonical)))
        .collect();
    hits.sort_by_key(|(pos, _)| *pos);
    hits.into_iter().map(|(_, term)| term).collect()
}
