use rusqlite::{Connection, Result, params};

use super::in_clause;
use crate::models::LikeRow;

pub fn like_exists(conn: &Connection, user_id: &str, content_id: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM likes WHERE user_id = ?1 AND content_id = ?2)",
        params![user_id, content_id],
        |row| row.get(0),
    )
}

pub fn insert_like(conn: &Connection, user_id: &str, content_id: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO likes (user_id, content_id) VALUES (?1, ?2)",
        params![user_id, content_id],
    )?;
    Ok(())
}

pub fn delete_like(conn: &Connection, user_id: &str, content_id: &str) -> Result<usize> {
    conn.execute(
        "DELETE FROM likes WHERE user_id = ?1 AND content_id = ?2",
        params![user_id, content_id],
    )
}

/// Batch-fetch likes for a set of content ids.
pub fn likes_for_content(conn: &Connection, content_ids: &[String]) -> Result<Vec<LikeRow>> {
    if content_ids.is_empty() {
        return Ok(vec![]);
    }

    let (placeholders, values) = in_clause(content_ids);
    let sql = format!(
        "SELECT user_id, content_id FROM likes WHERE content_id IN ({placeholders})"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(values.as_slice(), |row| {
            Ok(LikeRow {
                user_id: row.get(0)?,
                content_id: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(rows)
}
