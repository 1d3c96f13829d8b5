use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};
use ap_core::{ArticleRecord, ParseRequest};
use crate::{ApiError, AppState};

pub async fn extract(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ParseRequest>, JsonRejection>,
) -> Result<Json<ArticleRecord>, ApiError> {
    let Json(request) = body?;
    let record = state.parser.parse(&request).await?;
    Ok(Json(record))
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "ok": true }))
}
