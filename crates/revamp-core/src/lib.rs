//! Shared domain records and configuration for the profile-analysis pipeline.

pub mod analysis;
pub mod app_config;
pub mod config;
pub mod profile;

use thiserror::Error;

pub use analysis::{
    AnalysisResult, BrandTone, BusinessProfile, BusinessType, ColorSample, Contact, ContactKind,
};
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{PostRecord, ProfileRecord, MAX_POSTS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
