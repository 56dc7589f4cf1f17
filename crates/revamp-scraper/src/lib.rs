//! Profile analysis pipeline: fetch a public profile, parse it into stable
//! records, sample brand colors from its images, and classify the business.

pub mod analyze;
pub mod cache;
pub mod classify;
pub mod client;
pub mod error;
pub mod palette;
pub mod parse;
pub mod rate_limit;
pub mod types;

pub use analyze::{Analyzer, Stage};
pub use cache::ProfileCache;
pub use classify::classify;
pub use client::{ClientOptions, Pacer, ProfileClient, RandomPacer, USER_AGENTS};
pub use error::{FetchError, ImageError, ParseError, ScraperError};
pub use palette::{extract_palette, PaletteOptions};
pub use parse::parse_profile;
pub use rate_limit::FetchBudget;
