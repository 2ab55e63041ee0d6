use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the subject resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: Username,
}

/// Request guard: verifies the bearer token and records the subject in
/// request extensions.
///
/// Every request is checked on its own; nothing is cached between requests.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Owned, so no borrow of the request is held across the await.
    let token = extract_token_from_header(&req)?.to_owned();

    let username = state
        .user_service
        .authenticate(&token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(AuthenticatedUser { username });

    Ok(next.run(req).await)
}

/// Missing and malformed headers get the same body as a bad token.
fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req.headers().get(header::AUTHORIZATION).ok_or_else(|| {
        tracing::debug!(reason = "missing_header", "Request rejected");
        unauthorized()
    })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        tracing::debug!(reason = "unreadable_header", "Request rejected");
        unauthorized()
    })?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => {
            tracing::debug!(reason = "not_bearer", "Request rejected");
            Err(unauthorized())
        }
    }
}

fn unauthorized() -> Response {
    ApiError::from(UserError::Unauthenticated).into_response()
}
