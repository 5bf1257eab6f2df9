use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use taskfeed_types::api::{Claims, UpdateProfileRequest};

use crate::error::{ApiError, ok};
use crate::{AppState, blocking};

pub async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = blocking(move || state.engine.get_profile(&username)).await?;
    Ok(ok(profile))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = blocking(move || {
        state.engine.update_profile(
            claims.sub,
            req.name.as_deref(),
            req.bio.as_deref(),
            req.location.as_deref(),
            req.website.as_deref(),
        )
    })
    .await?;
    Ok(ok(profile))
}

pub async fn list_followers(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let followers = blocking(move || state.engine.list_followers(&username)).await?;
    Ok(ok(followers))
}

pub async fn list_following(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Extension(_claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let following = blocking(move || state.engine.list_following(&username)).await?;
    Ok(ok(following))
}

pub async fn toggle_follow(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let toggle = blocking(move || state.engine.toggle_follow(claims.sub, user_id)).await?;
    Ok(ok(toggle))
}
