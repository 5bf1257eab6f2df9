use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use taskfeed_types::api::{Claims, CreateCommentRequest};

use crate::error::{ApiError, ok};
use crate::{AppState, blocking};

pub async fn toggle_like(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let toggle = blocking(move || state.engine.toggle_like(claims.sub, content_id)).await?;
    Ok(ok(toggle))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(content_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment =
        blocking(move || state.engine.create_comment(claims.sub, content_id, &req.content))
            .await?;
    Ok(ok(comment))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(move || state.engine.delete_comment(claims.sub, comment_id)).await?;
    Ok(ok(()))
}
