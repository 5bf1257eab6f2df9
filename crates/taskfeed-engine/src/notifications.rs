//! Notification fan-out. A notification exists only as a side effect of a
//! like or comment, created and removed inside the same transaction as its
//! trigger, and never when the actor is acting on their own content.

use rusqlite::Connection;
use uuid::Uuid;

use taskfeed_db::queries::notifications;
use taskfeed_types::api::NotificationView;
use taskfeed_types::models::NotificationKind;

use crate::error::EngineResult;
use crate::{Engine, project};

pub(crate) fn like_created(
    conn: &Connection,
    target_author_id: &str,
    actor_id: &str,
    content_id: &str,
) -> rusqlite::Result<()> {
    if target_author_id == actor_id {
        return Ok(());
    }
    notifications::insert_notification(
        conn,
        &Uuid::new_v4().to_string(),
        target_author_id,
        actor_id,
        NotificationKind::Like.as_str(),
        Some(content_id),
        None,
    )
}

/// Precise reversal: only the notification(s) matching this exact
/// (recipient, actor, target) triple go away.
pub(crate) fn like_removed(
    conn: &Connection,
    target_author_id: &str,
    actor_id: &str,
    content_id: &str,
) -> rusqlite::Result<()> {
    notifications::delete_like_notifications(conn, target_author_id, actor_id, content_id)?;
    Ok(())
}

pub(crate) fn comment_created(
    conn: &Connection,
    target_author_id: &str,
    actor_id: &str,
    content_id: &str,
    comment_id: &str,
) -> rusqlite::Result<()> {
    if target_author_id == actor_id {
        return Ok(());
    }
    notifications::insert_notification(
        conn,
        &Uuid::new_v4().to_string(),
        target_author_id,
        actor_id,
        NotificationKind::Comment.as_str(),
        Some(content_id),
        Some(comment_id),
    )
}

pub(crate) fn comment_removed(conn: &Connection, comment_id: &str) -> rusqlite::Result<()> {
    notifications::delete_for_comment(conn, comment_id)?;
    Ok(())
}

impl Engine {
    /// Newest-first notifications for a recipient, actor summary joined.
    pub fn list_notifications(&self, user_id: Uuid) -> EngineResult<Vec<NotificationView>> {
        let rows = self
            .db()
            .with_conn(|conn| notifications::list_for_recipient(conn, &user_id.to_string()))?;
        Ok(rows.into_iter().map(project::notification_view).collect())
    }

    /// Returns how many notifications were newly marked read.
    pub fn mark_notifications_read(&self, user_id: Uuid) -> EngineResult<usize> {
        let n = self
            .db()
            .with_conn(|conn| notifications::mark_all_read(conn, &user_id.to_string()))?;
        Ok(n)
    }
}
