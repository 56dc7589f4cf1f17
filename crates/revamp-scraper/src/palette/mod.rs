//! Brand-color extraction from a profile's images.
//!
//! Images are downloaded concurrently but merged strictly in input order, so
//! the output never depends on which download finishes first. A failing
//! image contributes nothing and is logged; extraction itself never fails.

pub mod color;
mod quantize;

use std::future::Future;

use futures::future::join_all;
use revamp_core::{ColorSample, PostRecord, ProfileRecord};

use crate::client::ProfileClient;
use crate::error::{FetchError, ImageError};

pub use color::{is_near_neutral, merge_similar, redmean_distance, MERGE_DISTANCE};

/// Longest edge images are shrunk to before quantization.
const THUMBNAIL_EDGE: u32 = 150;

/// Anything that can hand back raw image bytes for a URL.
pub trait ImageSource: Sync {
    fn fetch_image(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send;
}

impl ImageSource for ProfileClient {
    fn fetch_image(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, FetchError>> + Send {
        ProfileClient::fetch_image(self, url)
    }
}

#[derive(Debug, Clone)]
pub struct PaletteOptions {
    /// Images sampled, profile picture first.
    pub max_images: usize,
    /// Dominant colors kept per image before filtering and merging.
    pub colors_per_image: usize,
    /// Cap on the merged palette.
    pub max_colors: usize,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            max_images: 5,
            colors_per_image: 3,
            max_colors: 5,
        }
    }
}

/// Image URLs worth sampling: the profile picture, then post images in post
/// order. Missing references and exact duplicates are skipped.
#[must_use]
pub fn image_candidates(
    profile: &ProfileRecord,
    posts: &[PostRecord],
    max_images: usize,
) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let post_images = posts
        .iter()
        .filter_map(|p| p.image_url.as_ref().or(p.thumbnail_url.as_ref()));
    for url in profile.profile_pic_url.iter().chain(post_images) {
        if urls.len() >= max_images {
            break;
        }
        if !url.is_empty() && !urls.contains(url) {
            urls.push(url.clone());
        }
    }
    urls
}

/// Samples, filters, and merges brand colors from up to
/// `options.max_images` images.
///
/// Returns an empty list (never an error) when no image yields a usable
/// color.
pub async fn extract_palette<S: ImageSource>(
    source: &S,
    image_urls: &[String],
    options: &PaletteOptions,
) -> Vec<ColorSample> {
    let urls: Vec<&str> = image_urls
        .iter()
        .take(options.max_images)
        .map(String::as_str)
        .collect();

    let results = join_all(
        urls.iter()
            .map(|url| sample_image(source, url, options.colors_per_image)),
    )
    .await;

    let mut samples = Vec::new();
    for (url, result) in urls.iter().zip(results) {
        match result {
            Ok(colors) => samples.extend(
                colors
                    .into_iter()
                    .filter(|c| !is_near_neutral(*c))
                    .map(|c| ColorSample::new(c, *url)),
            ),
            Err(e) => tracing::warn!(url, error = %e, "image skipped during palette extraction"),
        }
    }

    let mut palette = merge_similar(samples, MERGE_DISTANCE);
    palette.truncate(options.max_colors);
    let hex: Vec<String> = palette.iter().map(ColorSample::hex).collect();
    tracing::debug!(
        images = urls.len(),
        colors = ?hex,
        "palette extracted"
    );
    palette
}

async fn sample_image<S: ImageSource>(
    source: &S,
    url: &str,
    k: usize,
) -> Result<Vec<[u8; 3]>, ImageError> {
    let bytes = source.fetch_image(url).await?;
    let owned_url = url.to_owned();
    tokio::task::spawn_blocking(move || decode_palette(&owned_url, &bytes, k))
        .await
        .map_err(|e| ImageError::Join {
            url: url.to_owned(),
            reason: e.to_string(),
        })?
}

fn decode_palette(url: &str, bytes: &[u8], k: usize) -> Result<Vec<[u8; 3]>, ImageError> {
    let decoded = image::load_from_memory(bytes).map_err(|source| ImageError::Decode {
        url: url.to_owned(),
        source,
    })?;
    let thumb = decoded.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE).to_rgb8();
    Ok(quantize::dominant_colors(&thumb, k))
}
