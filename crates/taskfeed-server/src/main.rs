use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use taskfeed_api::middleware::require_auth;
use taskfeed_api::{AppState, AppStateInner, auth, content, interactions, notifications, users};
use taskfeed_engine::Engine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskfeed=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("TASKFEED_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("TASKFEED_DB_PATH").unwrap_or_else(|_| "taskfeed.db".into());
    let host = std::env::var("TASKFEED_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("TASKFEED_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database and engine
    let db = Arc::new(taskfeed_db::Database::open(&PathBuf::from(&db_path))?);
    let engine = Engine::with_default_cache(db.clone());

    let app_state: AppState = Arc::new(AppStateInner {
        engine,
        db,
        jwt_secret,
    });

    // Routes
    let public_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .with_state(app_state.clone());

    let protected_routes = Router::new()
        .route("/feed", get(content::get_feed))
        .route("/content", post(content::create_content))
        .route("/content/{id}", patch(content::update_content))
        .route("/content/{id}", delete(content::delete_content))
        .route("/content/{id}/status", patch(content::update_status))
        .route("/content/{id}/like", post(interactions::toggle_like))
        .route("/content/{id}/comments", post(interactions::create_comment))
        .route("/comments/{id}", delete(interactions::delete_comment))
        .route("/users/{id}/follow", post(users::toggle_follow))
        .route("/profiles/{username}", get(users::get_profile))
        .route("/profiles/{username}/followers", get(users::list_followers))
        .route("/profiles/{username}/following", get(users::list_following))
        .route("/profile", patch(users::update_profile))
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read", post(notifications::mark_read))
        .layer(middleware::from_fn(require_auth))
        .with_state(app_state);

    let app = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Taskfeed server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
