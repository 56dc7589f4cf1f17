use crate::app_config::{AppConfig, Environment};
use crate::profile::MAX_POSTS;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("REVAMP_ENV", "development"));
    let log_level = or_default("REVAMP_LOG_LEVEL", "info");

    let profile_endpoint = or_default(
        "REVAMP_PROFILE_ENDPOINT",
        "https://www.instagram.com/api/v1/users/web_profile_info/",
    );
    if !(profile_endpoint.starts_with("http://") || profile_endpoint.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "REVAMP_PROFILE_ENDPOINT".to_string(),
            reason: format!("expected an http(s) URL, got \"{profile_endpoint}\""),
        });
    }

    let request_timeout_secs = parse_u64("REVAMP_REQUEST_TIMEOUT_SECS", "30")?;
    let image_timeout_secs = parse_u64("REVAMP_IMAGE_TIMEOUT_SECS", "10")?;

    let delay_min_ms = parse_u64("REVAMP_DELAY_MIN_MS", "2000")?;
    let delay_max_ms = parse_u64("REVAMP_DELAY_MAX_MS", "5000")?;
    if delay_min_ms > delay_max_ms {
        return Err(ConfigError::InvalidEnvVar {
            var: "REVAMP_DELAY_MAX_MS".to_string(),
            reason: format!("{delay_max_ms} is below REVAMP_DELAY_MIN_MS ({delay_min_ms})"),
        });
    }

    let cache_ttl_secs = parse_u64("REVAMP_CACHE_TTL_SECS", "86400")?;
    let max_profile_fetches = parse_usize("REVAMP_MAX_PROFILE_FETCHES", "20")?;
    let fetch_window_secs = parse_u64("REVAMP_FETCH_WINDOW_SECS", "3600")?;

    let max_posts = parse_usize("REVAMP_MAX_POSTS", "12")?;
    if max_posts > MAX_POSTS {
        return Err(ConfigError::InvalidEnvVar {
            var: "REVAMP_MAX_POSTS".to_string(),
            reason: format!("{max_posts} exceeds the hard cap of {MAX_POSTS}"),
        });
    }
    let max_images = parse_usize("REVAMP_MAX_IMAGES", "5")?;
    let max_colors = parse_usize("REVAMP_MAX_COLORS", "5")?;

    let proxy_url = lookup("REVAMP_PROXY_URL")
        .ok()
        .filter(|s| !s.trim().is_empty());
    let rng_seed = match lookup("REVAMP_RNG_SEED") {
        Ok(raw) => Some(raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: "REVAMP_RNG_SEED".to_string(),
            reason: e.to_string(),
        })?),
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        log_level,
        profile_endpoint,
        request_timeout_secs,
        image_timeout_secs,
        delay_min_ms,
        delay_max_ms,
        cache_ttl_secs,
        max_profile_fetches,
        fetch_window_secs,
        max_posts,
        max_images,
        max_colors,
        proxy_url,
        rng_seed,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
