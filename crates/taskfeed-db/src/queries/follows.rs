use rusqlite::{Connection, Result, params};

pub fn follow_exists(conn: &Connection, follower_id: &str, followee_id: &str) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = ?1 AND followee_id = ?2)",
        params![follower_id, followee_id],
        |row| row.get(0),
    )
}

pub fn insert_follow(conn: &Connection, follower_id: &str, followee_id: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO follows (follower_id, followee_id) VALUES (?1, ?2)",
        params![follower_id, followee_id],
    )?;
    Ok(())
}

pub fn delete_follow(conn: &Connection, follower_id: &str, followee_id: &str) -> Result<usize> {
    conn.execute(
        "DELETE FROM follows WHERE follower_id = ?1 AND followee_id = ?2",
        params![follower_id, followee_id],
    )
}
