//! HTTP client facade for the profile endpoint and image CDN.

mod identity;
mod pacing;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Url};

use crate::cache::ProfileCache;
use crate::error::{FetchError, ScraperError};
use crate::rate_limit::FetchBudget;

pub use identity::{normalize_identifier, USER_AGENTS};
pub use pacing::{Pacer, RandomPacer};

/// Settings for [`ProfileClient`]. Defaults mirror the production endpoint
/// and the shipped configuration defaults.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub profile_endpoint: String,
    pub request_timeout: Duration,
    pub image_timeout: Duration,
    pub cache_ttl: Duration,
    /// Zero disables the rolling-window ceiling.
    pub max_profile_fetches: usize,
    pub fetch_window: Duration,
    pub proxy_url: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            profile_endpoint: "https://www.instagram.com/api/v1/users/web_profile_info/".to_owned(),
            request_timeout: Duration::from_secs(30),
            image_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(86_400),
            max_profile_fetches: 20,
            fetch_window: Duration::from_secs(3600),
            proxy_url: None,
        }
    }
}

impl ClientOptions {
    #[must_use]
    pub fn from_app_config(config: &revamp_core::AppConfig) -> Self {
        Self {
            profile_endpoint: config.profile_endpoint.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            image_timeout: Duration::from_secs(config.image_timeout_secs),
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            max_profile_fetches: config.max_profile_fetches,
            fetch_window: Duration::from_secs(config.fetch_window_secs),
            proxy_url: config.proxy_url.clone(),
        }
    }
}

/// Outbound HTTP for one process: profile lookups and image downloads.
///
/// Every network call is preceded by a pacing delay and carries a user agent
/// drawn from [`USER_AGENTS`], both supplied by the injected [`Pacer`].
/// Successful profile bodies are cached for `cache_ttl`; a cache hit skips
/// the delay, the fetch budget, and the network. Nothing is retried here.
pub struct ProfileClient {
    profile_client: Client,
    image_client: Client,
    endpoint: Url,
    endpoint_host: String,
    cache: ProfileCache,
    budget: FetchBudget,
    pacer: Arc<dyn Pacer>,
}

impl ProfileClient {
    /// Builds the client. Proxy absence is the normal mode; when a proxy URL
    /// is configured all requests go through it.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidEndpoint`] if `profile_endpoint` is not a URL.
    /// - [`ScraperError::InvalidProxy`] if `proxy_url` cannot be used.
    /// - [`ScraperError::ClientBuild`] if `reqwest` cannot build a client.
    pub fn new(options: ClientOptions, pacer: Arc<dyn Pacer>) -> Result<Self, ScraperError> {
        let endpoint =
            Url::parse(&options.profile_endpoint).map_err(|e| ScraperError::InvalidEndpoint {
                url: options.profile_endpoint.clone(),
                reason: e.to_string(),
            })?;
        let endpoint_host = identity::extract_host(&endpoint);

        let proxy = options
            .proxy_url
            .as_deref()
            .map(reqwest::Proxy::all)
            .transpose()
            .map_err(|source| ScraperError::InvalidProxy { source })?;

        let build = |timeout: Duration| -> Result<Client, ScraperError> {
            let mut builder = Client::builder()
                .timeout(timeout)
                .connect_timeout(Duration::from_secs(10));
            if let Some(proxy) = proxy.clone() {
                builder = builder.proxy(proxy);
            }
            Ok(builder.build()?)
        };

        Ok(Self {
            profile_client: build(options.request_timeout)?,
            image_client: build(options.image_timeout)?,
            endpoint,
            endpoint_host,
            cache: ProfileCache::new(options.cache_ttl),
            budget: FetchBudget::new(options.max_profile_fetches, options.fetch_window),
            pacer,
        })
    }

    #[must_use]
    pub fn cache(&self) -> &ProfileCache {
        &self.cache
    }

    #[must_use]
    pub fn budget(&self) -> &FetchBudget {
        &self.budget
    }

    /// Fetches the raw profile payload for `identifier`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidIdentifier`] before any network activity.
    /// - [`FetchError::BudgetExhausted`] when the rolling-window ceiling is hit.
    /// - [`FetchError::NotFound`] on 404, [`FetchError::RateLimited`] on 429.
    /// - [`FetchError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`FetchError::Http`] on transport failure or an unreadable body.
    pub async fn fetch_profile(&self, identifier: &str) -> Result<Arc<str>, FetchError> {
        let username = normalize_identifier(identifier)?;

        if let Some(body) = self.cache.get(username) {
            tracing::debug!(username, "profile cache hit");
            return Ok(body);
        }

        self.budget.try_acquire(&self.endpoint_host, username)?;

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("username", username);

        let user_agent = self.pace().await;
        tracing::info!(username, "fetching profile");

        let response = self
            .profile_client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .header(reqwest::header::ACCEPT, "*/*")
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(reqwest::header::ORIGIN, identity::WEB_ORIGIN)
            .header(reqwest::header::REFERER, identity::profile_referer(username))
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .header(reqwest::header::PRAGMA, "no-cache")
            .header("X-IG-App-ID", identity::IG_APP_ID)
            .header("X-ASBD-ID", identity::ASBD_ID)
            .header("X-IG-WWW-Claim", "0")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Sec-Fetch-Dest", "empty")
            .header("Sec-Fetch-Mode", "cors")
            .header("Sec-Fetch-Site", "same-origin")
            .send()
            .await
            .map_err(|source| FetchError::Http {
                target: username.to_owned(),
                source,
            })?;

        check_status(&response, username)?;

        let body = response.text().await.map_err(|source| FetchError::Http {
            target: username.to_owned(),
            source,
        })?;
        let body: Arc<str> = Arc::from(body);
        self.cache.insert(username, Arc::clone(&body));
        tracing::info!(username, bytes = body.len(), "profile fetched");
        Ok(body)
    }

    /// Downloads raw image bytes from `url`. Image downloads are paced but
    /// neither cached nor budgeted.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure or a non-2xx status.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let user_agent = self.pace().await;
        tracing::debug!(url, "downloading image");

        let response = self
            .image_client
            .get(url)
            .header(reqwest::header::USER_AGENT, user_agent)
            .header(reqwest::header::ACCEPT, "image/avif,image/webp,image/*,*/*;q=0.8")
            .header(reqwest::header::REFERER, format!("{}/", identity::WEB_ORIGIN))
            .send()
            .await
            .map_err(|source| FetchError::Http {
                target: url.to_owned(),
                source,
            })?;

        check_status(&response, url)?;

        let bytes = response.bytes().await.map_err(|source| FetchError::Http {
            target: url.to_owned(),
            source,
        })?;
        Ok(bytes.to_vec())
    }

    /// Sleeps for the pacer's next delay and returns the user agent to send.
    async fn pace(&self) -> &'static str {
        let delay = self.pacer.next_delay();
        let user_agent = USER_AGENTS[self.pacer.pick(USER_AGENTS.len()) % USER_AGENTS.len()];
        if !delay.is_zero() {
            tracing::debug!(
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "pacing before request"
            );
            tokio::time::sleep(delay).await;
        }
        user_agent
    }
}

fn check_status(response: &reqwest::Response, target: &str) -> Result<(), FetchError> {
    let status = response.status();

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(60);
        return Err(FetchError::RateLimited {
            target: target.to_owned(),
            retry_after_secs,
        });
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound {
            target: target.to_owned(),
        });
    }

    if !status.is_success() {
        return Err(FetchError::UnexpectedStatus {
            status: status.as_u16(),
            target: target.to_owned(),
        });
    }

    Ok(())
}
