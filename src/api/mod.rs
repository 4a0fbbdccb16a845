//! # API Module
//!
//! This module provides the HTTP endpoints the Bardo web client calls. Each
//! handler makes exactly one call into an upstream client and returns the
//! result unchanged as JSON.
//!
//! ## Endpoints
//!
//! - [`playlist`] - `GET /get`. Looks up the fixed playlist [`PLAYLIST_ID`]
//!   through the catalog client.
//! - [`play`] - `GET /play/{id}` and `GET /play/`. Builds
//!   `WATCH_URL_PREFIX + id` and hands it to the stream resolver. The id is
//!   not validated and never rejected by the extractor; whatever the resolver
//!   makes of it is the endpoint's behavior.
//!
//! ## Failures
//!
//! Every upstream failure becomes [`ApiError`], which renders as a plain
//! `500 Internal Server Error` with an empty body. Client errors (bad id) and
//! network errors are not told apart.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use bardo::{api, server::AppState};
//!
//! let app: Router = Router::new()
//!     .route("/get", get(api::playlist))
//!     .route("/play/{id}", get(api::play))
//!     .with_state(AppState::from_env());
//! ```

mod error;
mod play;
mod playlist;

pub use error::ApiError;
pub use play::play;
pub use playlist::playlist;

/// YouTube Music playlist served by `GET /get`.
pub const PLAYLIST_ID: &str = "PLK0Q01rDLbZECDAMwGQ5MZmSQDJeUWhWh";

/// Prefix the `/play/{id}` path parameter is appended to.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";
