//! # YouTube Integration Module
//!
//! Clients for the two YouTube services the backend forwards to. Both talk to
//! InnerTube, the JSON API behind the YouTube web and mobile apps, and need no
//! credentials.
//!
//! ## Core Modules
//!
//! - [`catalog`] - YouTube Music playlist lookup (`browse` endpoint), with
//!   continuation handling up to a track limit.
//! - [`resolver`] - Stream resolution for one watch URL (`player` endpoint),
//!   producing every directly playable format plus the best video-only and
//!   audio-only pick.
//!
//! ## Seams
//!
//! The HTTP layer only sees the [`CatalogClient`] and [`StreamResolver`]
//! traits. Both return `serde_json::Value` so results are passed through to
//! the web client without being reshaped, and tests can substitute any
//! structure they like.

pub mod catalog;
pub mod resolver;
pub mod types;

use async_trait::async_trait;
use serde_json::Value;

pub use catalog::YtMusicClient;
pub use resolver::YtStreamResolver;

pub const YTM_BASE_URL: &str = "https://music.youtube.com/youtubei/v1";
pub const YT_BASE_URL: &str = "https://www.youtube.com/youtubei/v1";

/// Errors produced by the YouTube clients.
#[derive(Debug, thiserror::Error)]
pub enum YoutubeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not a valid watch URL: {url}")]
    InvalidVideoUrl { url: String },

    #[error("Video is not playable: {reason}")]
    Unplayable { reason: String },

    #[error("Unexpected response: {reason}")]
    UnexpectedResponse { reason: String },
}

/// Playlist lookup against a music catalog.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn get_playlist(&self, playlist_id: &str) -> Result<Value, YoutubeError>;
}

/// Resolution of a watch URL into playable stream descriptors.
#[async_trait]
pub trait StreamResolver: Send + Sync {
    async fn resolve(&self, url: &str) -> Result<Value, YoutubeError>;
}
