use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use taskfeed_engine::EngineError;

/// Engine failure mapped to an HTTP status and a short human-readable
/// message. Internal detail never crosses the boundary; storage failures
/// are logged server-side and surface as a generic 500.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "something went wrong".into(),
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NotFound => Self {
                status: StatusCode::NOT_FOUND,
                message: "not found".into(),
            },
            EngineError::Unauthorized => Self {
                status: StatusCode::FORBIDDEN,
                message: "not allowed".into(),
            },
            EngineError::Validation(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                message: msg.into(),
            },
            EngineError::InvalidTransition { from, to } => Self {
                status: StatusCode::CONFLICT,
                message: format!("cannot change status from {from} to {to}"),
            },
            EngineError::Transaction(e) => {
                error!("transaction failure: {}", e);
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}

/// Success envelope: callers branch on `success` for every operation.
pub fn ok<T: serde::Serialize>(value: T) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "value": value,
    }))
}
