use axum::{
    Json,
    extract::State,
    http::Uri,
};
use serde_json::Value;

use super::{ApiError, WATCH_URL_PREFIX};
use crate::server::AppState;

/// Resolves the streams of one video. Serves both `/play/{id}` and `/play/`.
///
/// The id is read from the raw request path and percent-decoded lossily, so
/// every id reaches the resolver, including empty ones and ones that do not
/// decode to UTF-8.
pub async fn play(State(state): State<AppState>, uri: Uri) -> Result<Json<Value>, ApiError> {
    let url = WATCH_URL_PREFIX.to_string() + &id_from_path(uri.path());
    let streams = state.resolver.resolve(&url).await?;
    Ok(Json(streams))
}

fn id_from_path(path: &str) -> String {
    let raw = path.strip_prefix("/play/").unwrap_or_default();
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}
