use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Failure of a request handler, rendered as a JSON error response.
#[derive(Debug)]
pub enum ApiError {
    /// The pipeline failed; client errors carry their message, the rest
    /// stay opaque.
    Parse(ap_core::Error),
    /// The request body could not be read as a parse request.
    Body(JsonRejection),
}

impl From<ap_core::Error> for ApiError {
    fn from(e: ap_core::Error) -> Self {
        ApiError::Parse(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        ApiError::Body(e)
    }
}

fn rejection_type(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::JsonDataError(_) => "type_error",
        JsonRejection::JsonSyntaxError(_) => "json_invalid",
        JsonRejection::MissingJsonContentType(_) => "content_type",
        _ => "value_error",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Parse(ap_core::Error::InvalidRequest) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": ap_core::Error::InvalidRequest.to_string() })),
            )
                .into_response(),
            ApiError::Parse(e) if e.is_client_error() => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": e.to_string() })),
            )
                .into_response(),
            ApiError::Parse(e) => {
                error!("Unhandled error while parsing article: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            ApiError::Body(JsonRejection::BytesRejection(rejection)) => {
                let status = rejection.status();
                (status, Json(json!({ "detail": rejection.body_text() }))).into_response()
            }
            ApiError::Body(rejection) => {
                let detail = json!([{
                    "loc": ["body"],
                    "msg": rejection.body_text(),
                    "type": rejection_type(&rejection),
                }]);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": detail }))).into_response()
            }
        }
    }
}
