use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::{AppState, DEFAULT_MAX_BODY_BYTES};

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    Router::new()
        .route("/extract", post(handlers::extract))
        .route("/healthz", get(handlers::healthz))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use ap_core::{ArticleParser, ArticleRecord, ParseRequest, Result, Error};
    pub use crate::{create_app, ApiError, AppState};
}
