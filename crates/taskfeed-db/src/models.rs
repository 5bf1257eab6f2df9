/// Database row types — these map directly to SQLite rows.
/// Distinct from the taskfeed-types API models to keep the DB layer
/// independent; ids and timestamps stay TEXT until the engine projects them.

pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub image: Option<String>,
    pub created_at: String,
}

pub struct ContentRow {
    pub id: String,
    pub kind: String,
    pub author_id: String,
    pub content: String,
    pub image: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
}

/// Content row joined with its author in a single query (eliminates N+1).
pub struct ContentFeedRow {
    pub id: String,
    pub kind: String,
    pub author_id: String,
    pub content: String,
    pub image: Option<String>,
    pub status: Option<String>,
    pub created_at: String,
    pub author_username: String,
    pub author_name: Option<String>,
    pub author_image: Option<String>,
}

pub struct CommentFeedRow {
    pub id: String,
    pub content_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: String,
    pub author_username: String,
    pub author_name: Option<String>,
    pub author_image: Option<String>,
}

/// A comment loaded together with its target's author, for the dual
/// authorization rule on deletion.
pub struct CommentTargetRow {
    pub id: String,
    pub author_id: String,
    pub content_id: String,
    pub target_author_id: String,
}

pub struct LikeRow {
    pub user_id: String,
    pub content_id: String,
}

pub struct NotificationFeedRow {
    pub id: String,
    pub kind: String,
    pub actor_id: String,
    pub content_id: Option<String>,
    pub comment_id: Option<String>,
    pub read: bool,
    pub created_at: String,
    pub actor_username: String,
    pub actor_name: Option<String>,
    pub actor_image: Option<String>,
}

/// Minimal author projection used by follower/following listings.
pub struct UserSummaryRow {
    pub id: String,
    pub username: String,
    pub name: Option<String>,
    pub image: Option<String>,
}
