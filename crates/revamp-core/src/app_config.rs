#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Profile endpoint; the identifier is appended as `?username=<id>`.
    pub profile_endpoint: String,
    pub request_timeout_secs: u64,
    pub image_timeout_secs: u64,
    /// Lower bound of the pre-request pacing delay.
    pub delay_min_ms: u64,
    /// Upper bound of the pre-request pacing delay. Always `>= delay_min_ms`.
    pub delay_max_ms: u64,
    pub cache_ttl_secs: u64,
    pub max_profile_fetches: usize,
    pub fetch_window_secs: u64,
    pub max_posts: usize,
    pub max_images: usize,
    pub max_colors: usize,
    pub proxy_url: Option<String>,
    pub rng_seed: Option<u64>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("profile_endpoint", &self.profile_endpoint)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("image_timeout_secs", &self.image_timeout_secs)
            .field("delay_min_ms", &self.delay_min_ms)
            .field("delay_max_ms", &self.delay_max_ms)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("max_profile_fetches", &self.max_profile_fetches)
            .field("fetch_window_secs", &self.fetch_window_secs)
            .field("max_posts", &self.max_posts)
            .field("max_images", &self.max_images)
            .field("max_colors", &self.max_colors)
            .field("proxy_url", &self.proxy_url.as_ref().map(|_| "[redacted]"))
            .field("rng_seed", &self.rng_seed)
            .finish()
    }
}
