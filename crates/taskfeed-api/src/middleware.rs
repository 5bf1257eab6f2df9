use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, Validation, decode};

use taskfeed_types::api::Claims;

/// Extract and validate JWT from the Authorization header. A missing or
/// invalid token is a distinguished "not signed in" result, never a silent
/// empty success.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, Response> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(unauthenticated)?;

    let secret =
        std::env::var("TASKFEED_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| unauthenticated())?;

    req.extensions_mut().insert(token_data.claims);
    Ok(next.run(req).await)
}

fn unauthenticated() -> Response {
    let body = Json(serde_json::json!({
        "success": false,
        "error": "not signed in",
    }));
    (StatusCode::UNAUTHORIZED, body).into_response()
}
