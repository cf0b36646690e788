// Router construction - routes, CORS and request tracing
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_board, health_check, method_not_allowed, options, post_score,
};
use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::POST,
            Method::GET,
            Method::OPTIONS,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::CONTENT_LENGTH,
            header::ACCEPT_ENCODING,
            HeaderName::from_static("x-csrf-token"),
            header::AUTHORIZATION,
        ])
}

/// `/` serves the board (GET) and takes scores (POST); other methods get 405.
pub fn build_router(state: Arc<AppState>) -> Router {
    // An explicit HEAD arm keeps `get` from answering HEAD implicitly.
    let board_routes = get(get_board)
        .post(post_score)
        .options(options)
        .head(method_not_allowed);

    Router::new()
        .route("/", board_routes)
        .route("/healthz", get(health_check))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
