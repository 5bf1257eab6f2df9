use axum::{Extension, extract::State, response::IntoResponse};

use taskfeed_types::api::Claims;

use crate::error::{ApiError, ok};
use crate::{AppState, blocking};

pub async fn list_notifications(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let inbox = blocking(move || state.engine.list_notifications(claims.sub)).await?;
    Ok(ok(inbox))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let marked = blocking(move || state.engine.mark_notifications_read(claims.sub)).await?;
    Ok(ok(serde_json::json!({ "marked": marked })))
}
