//! services/api/src/web/router.rs
//!
//! Assembles the complete application: the JSON API, the index document,
//! static files, Swagger UI and CORS.

use crate::config::ConfigError;
use crate::web::rest::{handle_request, ApiDoc};
use crate::web::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::post,
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const INDEX_DOCUMENT: &str = "index.html";

fn cors_layer(allowed_origin: Option<&str>) -> Result<CorsLayer, ConfigError> {
    let Some(origin) = allowed_origin else {
        return Ok(CorsLayer::permissive());
    };
    let origin = origin.parse::<HeaderValue>().map_err(|e| {
        ConfigError::InvalidValue("CORS_ALLOWED_ORIGIN".to_string(), e.to_string())
    })?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}

pub fn build_router(app_state: Arc<AppState>) -> Result<Router, ConfigError> {
    let config = app_state.config.clone();
    let cors = cors_layer(config.cors_allowed_origin.as_deref())?;

    let api_router = Router::new()
        .route("/api/request", post(handle_request))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .with_state(app_state);

    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route_service("/", ServeFile::new(config.templates_dir.join(INDEX_DOCUMENT)))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(cors);

    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_origin_must_be_a_valid_header_value() {
        assert!(cors_layer(Some("http://localhost:3000")).is_ok());
        assert!(matches!(
            cors_layer(Some("bad\norigin")),
            Err(ConfigError::InvalidValue(name, _)) if name == "CORS_ALLOWED_ORIGIN"
        ));
    }
}
