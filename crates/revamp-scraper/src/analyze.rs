//! End-to-end profile analysis.
//!
//! One analysis walks `Fetching -> Parsing -> Extracting -> Assembled`.
//! Fetch and parse failures end the run at the stage they occurred in;
//! image failures are absorbed during extraction and only shrink the
//! palette.

use chrono::Utc;
use revamp_core::{AnalysisResult, AppConfig, PostRecord};

use crate::classify::{classify, website_contact};
use crate::client::{normalize_identifier, ProfileClient};
use crate::error::ScraperError;
use crate::palette::{extract_palette, image_candidates, PaletteOptions};
use crate::parse::parse_profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Fetching,
    Parsing,
    Extracting,
    Assembled,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Parsing => "parsing",
            Self::Extracting => "extracting",
            Self::Assembled => "assembled",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs analyses against a shared [`ProfileClient`], so cache and fetch
/// budget persist across calls.
pub struct Analyzer {
    client: ProfileClient,
    max_posts: usize,
    palette: PaletteOptions,
}

impl Analyzer {
    #[must_use]
    pub fn new(client: ProfileClient, max_posts: usize, palette: PaletteOptions) -> Self {
        Self {
            client,
            max_posts,
            palette,
        }
    }

    /// Uses the post and palette limits from `config`.
    #[must_use]
    pub fn from_app_config(client: ProfileClient, config: &AppConfig) -> Self {
        let palette = PaletteOptions {
            max_images: config.max_images,
            max_colors: config.max_colors,
            ..PaletteOptions::default()
        };
        Self::new(client, config.max_posts, palette)
    }

    #[must_use]
    pub fn client(&self) -> &ProfileClient {
        &self.client
    }

    /// Analyzes one public profile.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Fetch`] if the identifier is invalid or the profile
    ///   request fails; nothing else is attempted.
    /// - [`ScraperError::Parse`] if the payload is not a JSON object.
    ///
    /// Image download or decode failures never surface here.
    pub async fn analyze(&self, identifier: &str) -> Result<AnalysisResult, ScraperError> {
        let username = normalize_identifier(identifier)?;

        tracing::info!(username, stage = %Stage::Fetching, "analysis started");
        let raw = self.client.fetch_profile(username).await.inspect_err(|e| {
            tracing::warn!(username, stage = %Stage::Fetching, error = %e, "analysis aborted");
        })?;

        tracing::debug!(username, stage = %Stage::Parsing, bytes = raw.len(), "parsing payload");
        let (profile, posts) = parse_profile(username, &raw, self.max_posts).inspect_err(|e| {
            tracing::warn!(username, stage = %Stage::Parsing, error = %e, "analysis aborted");
        })?;

        tracing::debug!(
            username,
            stage = %Stage::Extracting,
            posts = posts.len(),
            "extracting colors and business signals"
        );
        let image_urls = image_candidates(&profile, &posts, self.palette.max_images);
        let captions: Vec<&str> = posts.iter().filter_map(|p| p.caption.as_deref()).collect();
        let hashtags: Vec<&str> = posts.iter().flat_map(post_hashtags).collect();

        let (brand_colors, mut business_info) = tokio::join!(
            extract_palette(&self.client, &image_urls, &self.palette),
            async { classify(profile.biography.as_deref(), &captions, &hashtags) },
        );
        if let Some(website) = profile.external_url.as_deref().and_then(website_contact) {
            if !business_info.contact_info.contains(&website) {
                business_info.contact_info.push(website);
            }
        }

        let result = AnalysisResult {
            profile,
            posts,
            brand_colors,
            business_info,
            analyzed_at: Utc::now(),
        };
        tracing::info!(
            username,
            stage = %Stage::Assembled,
            posts = result.posts.len(),
            colors = result.brand_colors.len(),
            business_type = %result.business_info.business_type,
            "analysis complete"
        );
        Ok(result)
    }
}

fn post_hashtags(post: &PostRecord) -> impl Iterator<Item = &str> {
    post.hashtags.iter().map(String::as_str)
}
