//! Row-to-view projection. Ids and timestamps come back from SQLite as
//! TEXT; corrupt values are logged and defaulted rather than failing the
//! whole read.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use taskfeed_db::models::{CommentFeedRow, ContentRow, NotificationFeedRow, UserSummaryRow};
use taskfeed_types::api::{CommentView, ContentItem, NotificationView, UserSummary};
use taskfeed_types::models::{ContentKind, NotificationKind, TaskStatus};

pub(crate) fn parse_id(s: &str) -> Uuid {
    s.parse().unwrap_or_else(|e| {
        warn!("Corrupt id '{}': {}", s, e);
        Uuid::default()
    })
}

pub(crate) fn parse_timestamp(s: &str) -> DateTime<Utc> {
    s.parse::<DateTime<Utc>>()
        .or_else(|_| {
            // SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without
            // timezone. Parse as naive UTC and convert.
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", s, e);
            DateTime::default()
        })
}

pub(crate) fn parse_kind(s: &str) -> ContentKind {
    ContentKind::parse(s).unwrap_or_else(|| {
        warn!("Corrupt content kind '{}'", s);
        ContentKind::Post
    })
}

pub(crate) fn parse_status(s: Option<&str>) -> Option<TaskStatus> {
    s.map(|v| {
        TaskStatus::parse(v).unwrap_or_else(|| {
            warn!("Corrupt task status '{}'", v);
            TaskStatus::Pending
        })
    })
}

pub(crate) fn content_item(row: ContentRow) -> ContentItem {
    ContentItem {
        id: parse_id(&row.id),
        kind: parse_kind(&row.kind),
        author_id: parse_id(&row.author_id),
        content: row.content,
        image: row.image,
        status: parse_status(row.status.as_deref()),
        created_at: parse_timestamp(&row.created_at),
    }
}

pub(crate) fn comment_view(row: CommentFeedRow) -> CommentView {
    CommentView {
        id: parse_id(&row.id),
        author: UserSummary {
            id: parse_id(&row.author_id),
            name: row.author_name,
            username: row.author_username,
            image: row.author_image,
        },
        content: row.content,
        created_at: parse_timestamp(&row.created_at),
    }
}

pub(crate) fn user_summary(row: UserSummaryRow) -> UserSummary {
    UserSummary {
        id: parse_id(&row.id),
        name: row.name,
        username: row.username,
        image: row.image,
    }
}

pub(crate) fn notification_view(row: NotificationFeedRow) -> NotificationView {
    NotificationView {
        id: parse_id(&row.id),
        kind: NotificationKind::parse(&row.kind).unwrap_or_else(|| {
            warn!("Corrupt notification kind '{}'", row.kind);
            NotificationKind::Like
        }),
        actor: UserSummary {
            id: parse_id(&row.actor_id),
            name: row.actor_name,
            username: row.actor_username,
            image: row.actor_image,
        },
        content_id: row.content_id.as_deref().map(parse_id),
        comment_id: row.comment_id.as_deref().map(parse_id),
        read: row.read,
        created_at: parse_timestamp(&row.created_at),
    }
}
