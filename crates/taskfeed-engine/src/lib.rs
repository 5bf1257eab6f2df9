//! The interaction and consistency engine: every mutation of shared content
//! and its social-graph state (likes, comments, follows, derived
//! notifications) plus the task status lifecycle. Each public operation is a
//! single request-scoped unit of work; all multi-record mutations run inside
//! one storage transaction so partial application is impossible.

pub mod cache;
pub mod content;
pub mod error;
pub mod follows;
pub mod guard;
pub mod interactions;
pub mod notifications;
pub mod status;
pub mod users;

mod project;

use std::sync::Arc;

use taskfeed_db::Database;
use tracing::warn;

use crate::cache::{LogViewCache, ViewCache};
pub use crate::error::{EngineError, EngineResult};

pub struct Engine {
    db: Arc<Database>,
    cache: Arc<dyn ViewCache>,
}

impl Engine {
    pub fn new(db: Arc<Database>, cache: Arc<dyn ViewCache>) -> Self {
        Self { db, cache }
    }

    /// Engine with the log-only view cache.
    pub fn with_default_cache(db: Arc<Database>) -> Self {
        Self::new(db, Arc::new(LogViewCache))
    }

    pub(crate) fn db(&self) -> &Database {
        &self.db
    }

    /// Fire-and-forget view invalidation after a successful mutation.
    pub(crate) fn invalidate(&self, scope: &str) {
        self.cache.invalidate(scope);
    }
}

const CONFLICT_RETRIES: u32 = 2;

/// Re-run an idempotent-safe operation when the storage layer reports a
/// busy/locked conflict. Only toggles and status re-assertions go through
/// here; every other failure kind is terminal for the call.
pub(crate) fn retry_on_conflict<T>(mut op: impl FnMut() -> EngineResult<T>) -> EngineResult<T> {
    let mut attempt = 0;
    loop {
        match op() {
            Err(err) if err.is_conflict() && attempt < CONFLICT_RETRIES => {
                attempt += 1;
                warn!("storage conflict, retrying (attempt {attempt}): {err}");
            }
            other => return other,
        }
    }
}
