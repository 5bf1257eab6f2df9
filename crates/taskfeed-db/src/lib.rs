pub mod migrations;
pub mod models;
pub mod queries;

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Result, Transaction, TransactionBehavior};
use tracing::info;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by the test suites.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        migrations::run(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock only means another thread panicked mid-query;
        // the connection itself is still usable.
        self.conn
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self.lock();
        f(&conn)
    }

    /// Run `f` inside one IMMEDIATE transaction: committed on `Ok`, rolled
    /// back on error. Every multi-record mutation goes through here so that
    /// partial application is impossible.
    pub fn with_tx<T, E>(&self, f: impl FnOnce(&Transaction<'_>) -> std::result::Result<T, E>) -> std::result::Result<T, E>
    where
        E: From<rusqlite::Error>,
    {
        let mut conn = self.lock();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(E::from)?;
        let out = f(&tx)?;
        tx.commit().map_err(E::from)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{content, follows, likes, users};

    fn db_with_users() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            users::insert_user(conn, "u-alice", "alice", "hash", None)?;
            users::insert_user(conn, "u-bob", "bob", "hash", None)
        })
        .unwrap();
        db
    }

    #[test]
    fn like_composite_key_rejects_duplicates() {
        let db = db_with_users();
        db.with_conn(|conn| {
            content::insert_content(conn, "c-1", "post", "u-alice", "hi", None, None)?;
            likes::insert_like(conn, "u-bob", "c-1")
        })
        .unwrap();

        let dup = db.with_conn(|conn| likes::insert_like(conn, "u-bob", "c-1"));
        assert!(dup.is_err());
    }

    #[test]
    fn self_follow_violates_check_constraint() {
        let db = db_with_users();
        let err = db.with_conn(|conn| follows::insert_follow(conn, "u-alice", "u-alice"));
        assert!(err.is_err());
    }

    #[test]
    fn posts_cannot_carry_a_status() {
        let db = db_with_users();
        let err = db.with_conn(|conn| {
            content::insert_content(conn, "c-1", "post", "u-alice", "hi", None, Some("pending"))
        });
        assert!(err.is_err());

        let err = db.with_conn(|conn| {
            content::insert_content(conn, "c-2", "task", "u-alice", "hi", None, None)
        });
        assert!(err.is_err());
    }

    #[test]
    fn tx_rolls_back_on_error() {
        let db = db_with_users();
        db.with_conn(|conn| content::insert_content(conn, "c-1", "post", "u-alice", "hi", None, None))
            .unwrap();

        let result: Result<()> = db.with_tx(|tx| {
            likes::insert_like(tx, "u-bob", "c-1")?;
            // duplicate insert fails and must take the first one with it
            likes::insert_like(tx, "u-bob", "c-1")
        });
        assert!(result.is_err());

        let liked = db
            .with_conn(|conn| likes::like_exists(conn, "u-bob", "c-1"))
            .unwrap();
        assert!(!liked);
    }
}
