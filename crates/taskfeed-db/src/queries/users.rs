use rusqlite::{Connection, OptionalExtension, Result, params};

use crate::models::{UserRow, UserSummaryRow};

pub fn insert_user(
    conn: &Connection,
    id: &str,
    username: &str,
    password_hash: &str,
    name: Option<&str>,
) -> Result<()> {
    conn.execute(
        "INSERT INTO users (id, username, password, name) VALUES (?1, ?2, ?3, ?4)",
        params![id, username, password_hash, name],
    )?;
    Ok(())
}

const USER_COLUMNS: &str =
    "id, username, password, name, bio, location, website, image, created_at";

fn map_user(row: &rusqlite::Row<'_>) -> Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
        name: row.get(3)?,
        bio: row.get(4)?,
        location: row.get(5)?,
        website: row.get(6)?,
        image: row.get(7)?,
        created_at: row.get(8)?,
    })
}

pub fn user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
        [username],
        map_user,
    )
    .optional()
}

pub fn user_by_id(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id],
        map_user,
    )
    .optional()
}

/// Patch semantics: only the provided fields change.
pub fn update_profile(
    conn: &Connection,
    id: &str,
    name: Option<&str>,
    bio: Option<&str>,
    location: Option<&str>,
    website: Option<&str>,
) -> Result<usize> {
    conn.execute(
        "UPDATE users SET
            name     = COALESCE(?2, name),
            bio      = COALESCE(?3, bio),
            location = COALESCE(?4, location),
            website  = COALESCE(?5, website)
         WHERE id = ?1",
        params![id, name, bio, location, website],
    )
}

pub fn follower_count(conn: &Connection, user_id: &str) -> Result<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM follows WHERE followee_id = ?1",
        [user_id],
        |row| row.get(0),
    )
}

pub fn following_count(conn: &Connection, user_id: &str) -> Result<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM follows WHERE follower_id = ?1",
        [user_id],
        |row| row.get(0),
    )
}

pub fn content_count(conn: &Connection, user_id: &str) -> Result<usize> {
    conn.query_row(
        "SELECT COUNT(*) FROM content_items WHERE author_id = ?1",
        [user_id],
        |row| row.get(0),
    )
}

fn map_summary(row: &rusqlite::Row<'_>) -> Result<UserSummaryRow> {
    Ok(UserSummaryRow {
        id: row.get(0)?,
        username: row.get(1)?,
        name: row.get(2)?,
        image: row.get(3)?,
    })
}

pub fn list_followers(conn: &Connection, user_id: &str) -> Result<Vec<UserSummaryRow>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.username, u.name, u.image
         FROM follows f
         JOIN users u ON u.id = f.follower_id
         WHERE f.followee_id = ?1
         ORDER BY f.created_at DESC, f.rowid DESC",
    )?;
    let rows = stmt.query_map([user_id], map_summary)?.collect();
    rows
}

pub fn list_following(conn: &Connection, user_id: &str) -> Result<Vec<UserSummaryRow>> {
    let mut stmt = conn.prepare(
        "SELECT u.id, u.username, u.name, u.image
         FROM follows f
         JOIN users u ON u.id = f.followee_id
         WHERE f.follower_id = ?1
         ORDER BY f.created_at DESC, f.rowid DESC",
    )?;
    let rows = stmt.query_map([user_id], map_summary)?.collect();
    rows
}
