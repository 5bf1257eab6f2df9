pub mod auth;
pub mod content;
pub mod error;
pub mod interactions;
pub mod middleware;
pub mod notifications;
pub mod users;

use std::sync::Arc;

use tracing::error;

use taskfeed_db::Database;
use taskfeed_engine::{Engine, EngineResult};

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub engine: Engine,
    pub db: Arc<Database>,
    pub jwt_secret: String,
}

/// Run a blocking engine call off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> EngineResult<T> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {}", e);
        ApiError::internal()
    })?;
    result.map_err(ApiError::from)
}
