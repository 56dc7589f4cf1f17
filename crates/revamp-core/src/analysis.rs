//! Derived analysis records: palette samples, business profile, and the
//! aggregate [`AnalysisResult`] document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::{PostRecord, ProfileRecord};

/// One representative color and the image it was sampled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSample {
    pub rgb: [u8; 3],
    pub source: String,
}

impl ColorSample {
    #[must_use]
    pub fn new(rgb: [u8; 3], source: impl Into<String>) -> Self {
        Self {
            rgb,
            source: source.into(),
        }
    }

    /// Lowercase `#rrggbb` form.
    #[must_use]
    pub fn hex(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

/// Closed set of inferred commercial categories.
///
/// `General` is the sentinel when no category rule matches; it is never
/// replaced by `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessType {
    Restaurant,
    Fashion,
    Beauty,
    Fitness,
    Photography,
    RealEstate,
    Consulting,
    Art,
    Education,
    Tech,
    #[default]
    General,
}

impl BusinessType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Fashion => "fashion",
            Self::Beauty => "beauty",
            Self::Fitness => "fitness",
            Self::Photography => "photography",
            Self::RealEstate => "real_estate",
            Self::Consulting => "consulting",
            Self::Art => "art",
            Self::Education => "education",
            Self::Tech => "tech",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for BusinessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandTone {
    Professional,
    Casual,
    Playful,
    Luxury,
    #[default]
    Unknown,
}

impl BrandTone {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Casual => "casual",
            Self::Playful => "playful",
            Self::Luxury => "luxury",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BrandTone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Whatsapp,
    Telegram,
    Website,
}

/// A validated contact channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub value: String,
}

impl Contact {
    #[must_use]
    pub fn new(kind: ContactKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Business signals derived from profile text. Never fetched, never `null`:
/// missing signal shows up as `General`, `Unknown`, or an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub business_type: BusinessType,
    pub services: Vec<String>,
    pub contact_info: Vec<Contact>,
    pub tone: BrandTone,
    pub keywords: Vec<String>,
    pub location: Option<String>,
}

impl BusinessProfile {
    /// Returns the first contact of the given kind, if any.
    #[must_use]
    pub fn contact(&self, kind: ContactKind) -> Option<&str> {
        self.contact_info
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.value.as_str())
    }
}

/// The complete, self-contained output of one profile analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub profile: ProfileRecord,
    pub posts: Vec<PostRecord>,
    pub brand_colors: Vec<ColorSample>,
    pub business_info: BusinessProfile,
    pub analyzed_at: DateTime<Utc>,
}
