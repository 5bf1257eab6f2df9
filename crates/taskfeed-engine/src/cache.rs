use tracing::debug;

/// Fire-and-forget view invalidation signal, emitted after successful
/// mutations. No correctness dependency: a lost signal means a stale page,
/// never inconsistent state.
pub trait ViewCache: Send + Sync {
    fn invalidate(&self, scope: &str);
}

/// Default implementation: the signal is only logged.
#[derive(Debug, Default)]
pub struct LogViewCache;

impl ViewCache for LogViewCache {
    fn invalidate(&self, scope: &str) {
        debug!("view cache invalidate: {scope}");
    }
}
