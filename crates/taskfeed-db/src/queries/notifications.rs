use rusqlite::{Connection, Result, params};

use crate::models::NotificationFeedRow;

pub fn insert_notification(
    conn: &Connection,
    id: &str,
    recipient_id: &str,
    actor_id: &str,
    kind: &str,
    content_id: Option<&str>,
    comment_id: Option<&str>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO notifications (id, recipient_id, actor_id, kind, content_id, comment_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![id, recipient_id, actor_id, kind, content_id, comment_id],
    )?;
    Ok(())
}

/// Remove exactly the like notification(s) for one (recipient, actor,
/// target) triple. Precise key match — notifications from other actors or
/// for other targets are untouched.
pub fn delete_like_notifications(
    conn: &Connection,
    recipient_id: &str,
    actor_id: &str,
    content_id: &str,
) -> Result<usize> {
    conn.execute(
        "DELETE FROM notifications
         WHERE kind = 'like' AND recipient_id = ?1 AND actor_id = ?2 AND content_id = ?3",
        params![recipient_id, actor_id, content_id],
    )
}

/// Cascade for comment deletion: every notification referencing the
/// comment, and only those.
pub fn delete_for_comment(conn: &Connection, comment_id: &str) -> Result<usize> {
    conn.execute(
        "DELETE FROM notifications WHERE comment_id = ?1",
        [comment_id],
    )
}

pub fn list_for_recipient(conn: &Connection, recipient_id: &str) -> Result<Vec<NotificationFeedRow>> {
    let mut stmt = conn.prepare(
        "SELECT n.id, n.kind, n.actor_id, n.content_id, n.comment_id, n.read, n.created_at,
                u.username, u.name, u.image
         FROM notifications n
         JOIN users u ON u.id = n.actor_id
         WHERE n.recipient_id = ?1
         ORDER BY n.created_at DESC, n.rowid DESC",
    )?;

    let rows = stmt
        .query_map([recipient_id], |row| {
            Ok(NotificationFeedRow {
                id: row.get(0)?,
                kind: row.get(1)?,
                actor_id: row.get(2)?,
                content_id: row.get(3)?,
                comment_id: row.get(4)?,
                read: row.get(5)?,
                created_at: row.get(6)?,
                actor_username: row.get(7)?,
                actor_name: row.get(8)?,
                actor_image: row.get(9)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn mark_all_read(conn: &Connection, recipient_id: &str) -> Result<usize> {
    conn.execute(
        "UPDATE notifications SET read = 1 WHERE recipient_id = ?1 AND read = 0",
        [recipient_id],
    )
}

/// Count of notifications tied to one comment — used by tests to verify
/// the cascade is precise.
pub fn count_for_comment(conn: &Connection, comment_id: &str) -> Result<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM notifications WHERE comment_id = ?1",
        [comment_id],
        |row| row.get(0),
    )
}
