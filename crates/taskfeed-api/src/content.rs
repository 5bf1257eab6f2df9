use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use uuid::Uuid;

use taskfeed_engine::content::ContentQuery;
use taskfeed_types::api::{Claims, CreateContentRequest, UpdateContentRequest, UpdateStatusRequest};
use taskfeed_types::models::{ContentKind, TaskStatus};

use crate::error::{ApiError, ok};
use crate::{AppState, blocking};

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub id: Option<Uuid>,
    pub author: Option<String>,
    pub kind: Option<ContentKind>,
    pub status: Option<TaskStatus>,
}

pub async fn get_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let feed = blocking(move || {
        state.engine.get_content(&ContentQuery {
            id: query.id,
            author_username: query.author,
            kind: query.kind,
            status: query.status,
        })
    })
    .await?;

    Ok(ok(feed))
}

pub async fn create_content(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = blocking(move || {
        state
            .engine
            .create_content(claims.sub, req.kind, &req.content, req.image.as_deref())
    })
    .await?;

    Ok(ok(item))
}

pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = blocking(move || {
        state
            .engine
            .update_content(id, claims.sub, req.content.as_deref(), req.image.as_deref())
    })
    .await?;

    Ok(ok(item))
}

pub async fn delete_content(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    blocking(move || state.engine.delete_content(id, claims.sub)).await?;
    Ok(ok(()))
}

pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Extension(_claims): Extension<Claims>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = blocking(move || state.engine.update_status(id, req.kind, req.status)).await?;
    Ok(ok(item))
}
