use rusqlite::{Connection, OptionalExtension, Result, params};

use super::in_clause;
use crate::models::{CommentFeedRow, CommentTargetRow};

pub fn insert_comment(
    conn: &Connection,
    id: &str,
    author_id: &str,
    content_id: &str,
    content: &str,
) -> Result<()> {
    conn.execute(
        "INSERT INTO comments (id, author_id, content_id, content) VALUES (?1, ?2, ?3, ?4)",
        params![id, author_id, content_id, content],
    )?;
    Ok(())
}

/// Comment plus the target item's author, loaded together so the dual
/// authorization check and the delete run against one snapshot.
pub fn comment_with_target(conn: &Connection, id: &str) -> Result<Option<CommentTargetRow>> {
    conn.query_row(
        "SELECT cm.id, cm.author_id, cm.content_id, c.author_id
         FROM comments cm
         JOIN content_items c ON c.id = cm.content_id
         WHERE cm.id = ?1",
        [id],
        |row| {
            Ok(CommentTargetRow {
                id: row.get(0)?,
                author_id: row.get(1)?,
                content_id: row.get(2)?,
                target_author_id: row.get(3)?,
            })
        },
    )
    .optional()
}

pub fn delete_comment(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM comments WHERE id = ?1", [id])
}

/// Single comment with its author summary, as returned to the creator.
pub fn comment_view_by_id(conn: &Connection, id: &str) -> Result<Option<CommentFeedRow>> {
    conn.query_row(
        "SELECT cm.id, cm.content_id, cm.author_id, cm.content, cm.created_at,
                u.username, u.name, u.image
         FROM comments cm
         JOIN users u ON u.id = cm.author_id
         WHERE cm.id = ?1",
        [id],
        |row| {
            Ok(CommentFeedRow {
                id: row.get(0)?,
                content_id: row.get(1)?,
                author_id: row.get(2)?,
                content: row.get(3)?,
                created_at: row.get(4)?,
                author_username: row.get(5)?,
                author_name: row.get(6)?,
                author_image: row.get(7)?,
            })
        },
    )
    .optional()
}

/// Batch-fetch comments for a set of content ids, oldest first, each with
/// its author summary.
pub fn comments_for_content(conn: &Connection, content_ids: &[String]) -> Result<Vec<CommentFeedRow>> {
    if content_ids.is_empty() {
        return Ok(vec![]);
    }

    let (placeholders, values) = in_clause(content_ids);
    let sql = format!(
        "SELECT cm.id, cm.content_id, cm.author_id, cm.content, cm.created_at,
                u.username, u.name, u.image
         FROM comments cm
         JOIN users u ON u.id = cm.author_id
         WHERE cm.content_id IN ({placeholders})
         ORDER BY cm.created_at ASC, cm.rowid ASC"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(values.as_slice(), |row| {
            Ok(CommentFeedRow {
                id: row.get(0)?,
                content_id: row.get(1)?,
                author_id: row.get(2)?,
                content: row.get(3)?,
                created_at: row.get(4)?,
                author_username: row.get(5)?,
                author_name: row.get(6)?,
                author_image: row.get(7)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(rows)
}
