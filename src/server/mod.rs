pub mod error;
mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    ai::{CommentAnalyst, Refiner},
    classifier::CommentClassifier,
    youtube::CommentSource,
};

pub struct AppContext {
    pub comments: Arc<dyn CommentSource>,
    pub classifier: CommentClassifier,
    pub refiner: Option<Refiner>,
    pub analyst: CommentAnalyst,
}

pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/comments", get(handlers::comments))
        .route("/video-info", get(handlers::video_info))
        .route("/analyze-comments", post(handlers::analyze_comments))
        .with_state(ctx)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    target: "http",
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}
