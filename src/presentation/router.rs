use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::config::{ConfigurationError, CorsSettings};
use crate::presentation::handlers::{
    chat_handler, extract_text_handler, health_handler, history_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Result<Router, ConfigurationError> {
    let cors = cors_layer(&state.settings.cors)?;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = state.settings.extraction.max_file_size_bytes();

    let mut router = Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(chat_handler))
        .route(
            "/extract_text_from_pdf",
            post(extract_text_handler).layer(DefaultBodyLimit::max(body_limit)),
        );

    if state.chat_service.history_enabled() {
        router = router.route("/history", get(history_handler));
    }

    Ok(router
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state))
}

/// Credentialed requests cannot use wildcards, so methods and headers are
/// mirrored from the preflight instead.
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer, ConfigurationError> {
    let origins = settings
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim_end_matches('/'))
                .map_err(|_| ConfigurationError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}
