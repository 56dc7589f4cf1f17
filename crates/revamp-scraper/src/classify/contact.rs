//! Contact extraction from biography text.
//!
//! Every candidate passes a format check before it is reported; anything
//! that fails is dropped without error. Phone-like digit runs inside an
//! email, a URL, or an already-captured messaging number are not reported
//! again as phones.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use revamp_core::{Contact, ContactKind};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}").expect("valid email regex")
});
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.|wa\.me/|t\.me/)\S+").expect("valid url regex")
});
static WHATSAPP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bwhats\s?app\b|\bwa\b)\s*[:\-]?\s*(\+?\d[\d\s().-]{5,}\d)|wa\.me/(\d+)")
        .expect("valid whatsapp regex")
});
static TELEGRAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:t\.me/|\btelegram\b\s*(?::\s*@?|@))([a-z][a-z0-9_]*)")
        .expect("valid telegram regex")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?\(?\d[\d\s().-]{5,}\d").expect("valid phone regex"));
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{1,2}[./-]\d{1,2}[./-]\d{2,4}|\d{4}[./-]\d{1,2}[./-]\d{1,2})$")
        .expect("valid date regex")
});
static YEAR_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:19|20)\d{2}\s*[-–]\s*(?:19|20)\d{2}$").expect("valid year range regex")
});

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

/// Emails, phones, WhatsApp numbers and Telegram handles found in `bio`,
/// grouped in that order and deduplicated.
pub(crate) fn extract_contacts(bio: &str) -> Vec<Contact> {
    let mut contacts: Vec<Contact> = Vec::new();
    let mut push = |contact: Contact| {
        if !contacts.contains(&contact) {
            contacts.push(contact);
        }
    };

    let mut claimed: Vec<Range<usize>> = Vec::new();

    let emails: Vec<_> = EMAIL_RE.find_iter(bio).collect();
    claimed.extend(emails.iter().map(regex::Match::range));
    claimed.extend(URL_RE.find_iter(bio).map(|m| m.range()));

    let mut whatsapp = Vec::new();
    for caps in WHATSAPP_RE.captures_iter(bio) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            claimed.push(caps.get(0).map_or(m.range(), |whole| whole.range()));
            if let Some(number) = normalize_phone(m.as_str()) {
                whatsapp.push(number);
            }
        }
    }

    let phones: Vec<String> = PHONE_RE
        .find_iter(bio)
        .filter(|m| !claimed.iter().any(|r| overlaps(r, &m.range())))
        .filter_map(|m| normalize_phone(m.as_str()))
        .collect();

    for email in emails {
        if is_valid_email(email.as_str()) {
            push(Contact::new(ContactKind::Email, email.as_str()));
        }
    }
    for phone in phones {
        push(Contact::new(ContactKind::Phone, phone));
    }
    for number in whatsapp {
        push(Contact::new(ContactKind::Whatsapp, number));
    }
    for caps in TELEGRAM_RE.captures_iter(bio) {
        if let Some(handle) = caps.get(1).map(|m| m.as_str()) {
            if is_valid_telegram_handle(handle) {
                push(Contact::new(ContactKind::Telegram, format!("@{handle}")));
            }
        }
    }

    contacts
}

/// Returns a website contact for an `http(s)` URL with a host.
pub(crate) fn website_contact(url: &str) -> Option<Contact> {
    let parsed = reqwest::Url::parse(url.trim()).ok()?;
    let web = matches!(parsed.scheme(), "http" | "https");
    (web && parsed.host_str().is_some_and(|h| h.contains('.')))
        .then(|| Contact::new(ContactKind::Website, url.trim()))
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Trimmed candidate if it holds 7–15 digits and is not a date or year range.
fn normalize_phone(candidate: &str) -> Option<String> {
    let trimmed = candidate.trim();
    if YEAR_RANGE_RE.is_match(trimmed) || DATE_RE.is_match(trimmed) {
        return None;
    }
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS)
        .contains(&digits)
        .then(|| trimmed.to_owned())
}

fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || local.starts_with('.')
        || local.ends_with('.')
        || local.contains("..")
        || domain.contains('@')
    {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels
            .iter()
            .all(|l| !l.is_empty() && !l.starts_with('-') && !l.ends_with('-'))
        && labels
            .last()
            .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}

fn is_valid_telegram_handle(handle: &str) -> bool {
    (5..=32).contains(&handle.len()) && !handle.ends_with('_')
}
