use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Result, params};

use crate::models::{ContentFeedRow, ContentRow};

pub fn insert_content(
    conn: &Connection,
    id: &str,
    kind: &str,
    author_id: &str,
    content: &str,
    image: Option<&str>,
    status: Option<&str>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO content_items (id, kind, author_id, content, image, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![id, kind, author_id, content, image, status],
    )?;
    Ok(())
}

const CONTENT_COLUMNS: &str = "id, kind, author_id, content, image, status, created_at";

fn map_content(row: &rusqlite::Row<'_>) -> Result<ContentRow> {
    Ok(ContentRow {
        id: row.get(0)?,
        kind: row.get(1)?,
        author_id: row.get(2)?,
        content: row.get(3)?,
        image: row.get(4)?,
        status: row.get(5)?,
        created_at: row.get(6)?,
    })
}

pub fn content_by_id(conn: &Connection, id: &str) -> Result<Option<ContentRow>> {
    conn.query_row(
        &format!("SELECT {CONTENT_COLUMNS} FROM content_items WHERE id = ?1"),
        [id],
        map_content,
    )
    .optional()
}

/// Load a like/comment target. Private tasks are not targets, so they are
/// invisible here.
pub fn shared_target_by_id(conn: &Connection, id: &str) -> Result<Option<ContentRow>> {
    conn.query_row(
        &format!("SELECT {CONTENT_COLUMNS} FROM content_items WHERE id = ?1 AND kind <> 'task'"),
        [id],
        map_content,
    )
    .optional()
}

pub fn update_content(
    conn: &Connection,
    id: &str,
    content: Option<&str>,
    image: Option<&str>,
) -> Result<usize> {
    conn.execute(
        "UPDATE content_items SET
            content = COALESCE(?2, content),
            image   = COALESCE(?3, image)
         WHERE id = ?1",
        params![id, content, image],
    )
}

pub fn update_status(conn: &Connection, id: &str, status: &str) -> Result<usize> {
    conn.execute(
        "UPDATE content_items SET status = ?2 WHERE id = ?1",
        params![id, status],
    )
}

/// Comments, likes and notifications referencing the item go with it via
/// the schema's ON DELETE CASCADE.
pub fn delete_content(conn: &Connection, id: &str) -> Result<usize> {
    conn.execute("DELETE FROM content_items WHERE id = ?1", [id])
}

#[derive(Debug, Default)]
pub struct ContentFilter<'a> {
    pub id: Option<&'a str>,
    pub author_username: Option<&'a str>,
    pub kind: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Feed listing: newest first, author joined in the same query. Comments
/// and likes are batch-fetched separately by the engine to keep this a
/// fixed two-table join.
pub fn list_content(conn: &Connection, filter: &ContentFilter<'_>) -> Result<Vec<ContentFeedRow>> {
    let mut sql = String::from(
        "SELECT c.id, c.kind, c.author_id, c.content, c.image, c.status, c.created_at,
                u.username, u.name, u.image
         FROM content_items c
         JOIN users u ON u.id = c.author_id
         WHERE 1 = 1",
    );
    let mut values: Vec<&dyn ToSql> = Vec::new();

    if let Some(id) = &filter.id {
        values.push(id);
        sql.push_str(&format!(" AND c.id = ?{}", values.len()));
    }
    if let Some(username) = &filter.author_username {
        values.push(username);
        sql.push_str(&format!(" AND u.username = ?{}", values.len()));
    }
    if let Some(kind) = &filter.kind {
        values.push(kind);
        sql.push_str(&format!(" AND c.kind = ?{}", values.len()));
    }
    if let Some(status) = &filter.status {
        values.push(status);
        sql.push_str(&format!(" AND c.status = ?{}", values.len()));
    }

    // rowid breaks ties within the same second
    sql.push_str(" ORDER BY c.created_at DESC, c.rowid DESC");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(values.as_slice(), |row| {
            Ok(ContentFeedRow {
                id: row.get(0)?,
                kind: row.get(1)?,
                author_id: row.get(2)?,
                content: row.get(3)?,
                image: row.get(4)?,
                status: row.get(5)?,
                created_at: row.get(6)?,
                author_username: row.get(7)?,
                author_name: row.get(8)?,
                author_image: row.get(9)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(rows)
}
