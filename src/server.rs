use axum::{
    Router,
    http::HeaderValue,
    routing::get,
};
use std::{net::SocketAddr, path::Path, str::FromStr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    services::ServeDir,
};

use crate::{
    Res, api, config, info,
    youtube::{CatalogClient, StreamResolver, YtMusicClient, YtStreamResolver},
};

/// Origins the web client is served from during development.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:8000"];

/// Client handles shared by every request. Created once at start-up and only
/// read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogClient>,
    pub resolver: Arc<dyn StreamResolver>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogClient>, resolver: Arc<dyn StreamResolver>) -> Self {
        Self { catalog, resolver }
    }

    /// YouTube backed clients configured from the environment.
    pub fn from_env() -> Self {
        Self::new(
            Arc::new(YtMusicClient::new(config::playlist_track_limit())),
            Arc::new(YtStreamResolver::new()),
        )
    }
}

/// Cross-origin policy for the two development origins.
///
/// Credentials are allowed, which rules out `*` for methods and headers, so
/// both are mirrored from the request instead.
pub fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .map(|origin| HeaderValue::from_static(*origin))
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Builds the application router: the two API routes, `/static` served from
/// `static_dir`, and the CORS policy over all of it.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/get", get(api::playlist))
        .route("/play/", get(api::play))
        .route("/play/{id}", get(api::play))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors_layer())
        .with_state(state)
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())
        .map_err(|e| format!("Failed to parse server address: {}", e))?;
    let static_dir = config::static_dir();

    let app = router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Listening on http://{} (static files from {})",
        addr,
        static_dir.display()
    );
    axum::serve(listener, app).await?;
    Ok(())
}
