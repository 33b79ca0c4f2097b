use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use bugs_sdk::SecurityContext;

use crate::api::rest::error::ApiError;
use crate::domain::error::DomainError;
use crate::module::ConcreteAppServices;

const NO_CREDENTIALS: &str = "Authentication credentials were not provided.";

/// Extract the key from `Authorization: Token <key>` (or `Bearer <key>`).
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, key) = value.trim().split_once(' ')?;
    let key = key.trim();
    let known = scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer");
    (known && !key.is_empty()).then_some(key)
}

/// Reject requests without a valid token; otherwise attach the caller's `SecurityContext`.
pub async fn require_token(
    State(services): State<ConcreteAppServices>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError::Unauthenticated(NO_CREDENTIALS.to_owned()))?;

    let user = services
        .sessions
        .authenticate(token)
        .await
        .map_err(|e| match e {
            DomainError::Auth { message } => ApiError::Unauthenticated(message),
            other => ApiError::Domain(other),
        })?;

    tracing::Span::current().record("user.id", tracing::field::display(user.id));
    req.extensions_mut().insert(SecurityContext::new(user.id));
    Ok(next.run(req).await)
}
