//! Per-table query functions. Everything takes a plain `&Connection` so the
//! same helpers compose inside `Database::with_tx` transactions and outside
//! them for reads.

pub mod comments;
pub mod content;
pub mod follows;
pub mod likes;
pub mod notifications;
pub mod users;

use rusqlite::types::ToSql;

/// Build an `IN (?1, ?2, ...)` placeholder list plus the matching params.
fn in_clause(ids: &[String]) -> (String, Vec<&dyn ToSql>) {
    let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{}", i)).collect();
    let params: Vec<&dyn ToSql> = ids.iter().map(|id| id as &dyn ToSql).collect();
    (placeholders.join(", "), params)
}
