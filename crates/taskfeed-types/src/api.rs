use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ContentKind, NotificationKind, TaskKind, TaskStatus};

// -- JWT Claims --

/// JWT claims shared between the REST middleware and the auth endpoints.
/// Canonical definition lives here in taskfeed-types to eliminate
/// duplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub username: String,
    pub token: String,
}

// -- Content --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateContentRequest {
    pub kind: ContentKind,
    pub content: String,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateContentRequest {
    pub content: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateStatusRequest {
    pub kind: TaskKind,
    pub status: TaskStatus,
}

/// A bare content record, as returned by create/update/status operations.
#[derive(Debug, Clone, Serialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub kind: ContentKind,
    pub author_id: Uuid,
    pub content: String,
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    pub created_at: DateTime<Utc>,
}

/// A feed item: content record joined with its author, comments and likes.
#[derive(Debug, Clone, Serialize)]
pub struct ContentView {
    pub id: Uuid,
    pub kind: ContentKind,
    pub author: UserSummary,
    pub content: String,
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<CommentView>,
    pub comment_count: usize,
    pub like_count: usize,
    /// Ids of every user who liked this item, so clients can render the
    /// current user's like state without another round trip.
    pub liked_by: Vec<Uuid>,
}

// -- Comments --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub id: Uuid,
    pub author: UserSummary,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// -- Toggles --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LikeToggle {
    pub liked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FollowToggle {
    pub following: bool,
}

// -- Users --

#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: Option<String>,
    pub username: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub id: Uuid,
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    // Derived counters, never stored.
    pub followers: usize,
    pub following: usize,
    pub content_count: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
}

// -- Notifications --

#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub actor: UserSummary,
    pub content_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}
