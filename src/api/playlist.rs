use axum::{Json, extract::State};
use serde_json::Value;

use super::{ApiError, PLAYLIST_ID};
use crate::server::AppState;

pub async fn playlist(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let playlist = state.catalog.get_playlist(PLAYLIST_ID).await?;
    Ok(Json(playlist))
}
