use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod catalog;
pub mod cloudinary;
pub mod commands;
pub mod gallery;
pub mod i18n;
pub mod lightbox;
pub mod page;
pub mod registry;
pub mod startup_checks;
pub mod static_files;
pub mod templating;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub data: DataConfig,
    pub preview: PreviewConfig,
    pub lightbox: LightboxConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    pub default_alt: String,
    pub default_camera: String,
    /// Category shown first and opened by default on the portfolio page.
    pub preferred_category: Option<String>,
    /// Category whose first image is used as the photographer's portrait.
    pub portrait_category: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Portfolio".to_string(),
            default_alt: "Portfolio image".to_string(),
            default_camera: registry::DEFAULT_CAMERA.to_string(),
            preferred_category: Some("astro".to_string()),
            portrait_category: "Of_the_photographer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    pub data_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("_data/images.yml"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Where `style.css`, `script.js` and `images/portrait.jpg` are copied from.
    pub source_directory: PathBuf,
    pub template_directory: PathBuf,
    pub output_directory: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::from("."),
            template_directory: PathBuf::from("templates"),
            output_directory: PathBuf::from("preview"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LightboxConfig {
    pub fade_delay_ms: u64,
    pub swipe_threshold_px: f32,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            fade_delay_ms: 900,
            swipe_threshold_px: 48.0,
        }
    }
}

impl LightboxConfig {
    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }
}

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use std::collections::HashMap;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub static_handler: static_files::StaticFileHandler,
}

async fn index_handler(
    State(app_state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    app_state
        .static_handler
        .serve("index.html", params.contains_key("v"))
        .await
}

async fn preview_file_handler(
    State(app_state): State<AppState>,
    Path(path): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    app_state
        .static_handler
        .serve(&path, params.contains_key("v"))
        .await
}

/// Router serving the generated preview directory.
pub async fn create_app(config: Config) -> Router {
    let app_state = AppState {
        static_handler: static_files::StaticFileHandler::new(config.preview.output_directory),
    };

    Router::new()
        .route("/", axum::routing::get(index_handler))
        .route("/{*path}", axum::routing::get(preview_file_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                })
                .on_request(|request: &axum::http::Request<_>, _span: &tracing::Span| {
                    let user_agent = request
                        .headers()
                        .get("user-agent")
                        .and_then(|h| h.to_str().ok())
                        .unwrap_or("-");

                    tracing::info!(
                        target: "access_log",
                        method = %request.method(),
                        path = %request.uri().path(),
                        query = ?request.uri().query(),
                        user_agent = %user_agent,
                        "request"
                    );
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        let size = response
                            .headers()
                            .get("content-length")
                            .and_then(|h| h.to_str().ok())
                            .unwrap_or("-");

                        tracing::info!(
                            target: "access_log",
                            status = %response.status(),
                            size = %size,
                            latency_ms = %latency.as_millis(),
                            "response"
                        );
                    },
                ),
        )
        .with_state(app_state)
}
