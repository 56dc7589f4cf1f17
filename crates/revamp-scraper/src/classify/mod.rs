//! Rule-based business classification over profile text.
//!
//! Classification never fails: absent or empty input yields
//! [`BusinessProfile::default`], i.e. `general`, no services, no contacts
//! and an `unknown` tone.

mod contact;
mod keywords;
pub mod rules;
mod services;

pub(crate) use contact::website_contact;
pub use keywords::MAX_KEYWORDS;
pub use services::MAX_SERVICES;

use revamp_core::BusinessProfile;

/// Classifies a profile from its biography, post captions and hashtags.
///
/// Category and tone consider the biography and captions together; contact
/// details and location come from the biography alone.
pub fn classify<C: AsRef<str>, H: AsRef<str>>(
    biography: Option<&str>,
    captions: &[C],
    hashtags: &[H],
) -> BusinessProfile {
    let bio = biography.unwrap_or_default();
    let captions: Vec<&str> = captions
        .iter()
        .map(|c| c.as_ref())
        .filter(|c| !c.trim().is_empty())
        .collect();

    let mut texts = Vec::with_capacity(captions.len() + 1);
    if !bio.trim().is_empty() {
        texts.push(bio);
    }
    texts.extend(captions.iter().copied());

    let business_type = rules::match_category(&texts);
    let tone = rules::match_tone(&texts.join("\n"));
    let services = services::extract_services(biography, &captions);
    let contact_info = contact::extract_contacts(bio);
    let keywords = keywords::extract_keywords(hashtags);
    let location = keywords::extract_location(bio);

    tracing::debug!(
        business_type = %business_type,
        tone = %tone,
        services = services.len(),
        contacts = contact_info.len(),
        keywords = keywords.len(),
        "classified profile text"
    );

    BusinessProfile {
        business_type,
        services,
        contact_info,
        tone,
        keywords,
        location,
    }
}
