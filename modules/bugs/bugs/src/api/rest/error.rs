use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Map, Value, json};

use crate::api::rest::envelope::respond;
use crate::domain::error::DomainError;

/// Error returned by REST handlers and middleware.
#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// Missing or rejected credentials on a protected route.
    Unauthenticated(String),
    /// Body could not be decoded.
    BadRequest(String),
    /// Path did not name a resource.
    NotFound(String),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Map a domain error to a status, message and `data` payload.
fn domain_error_parts(e: &DomainError) -> (StatusCode, String, Value) {
    match e {
        DomainError::Validation {
            field: Some(field),
            message,
        } => {
            let mut fields = Map::new();
            fields.insert(field.clone(), json!([message]));
            (StatusCode::BAD_REQUEST, message.clone(), Value::Object(fields))
        }
        DomainError::Validation {
            field: None,
            message,
        }
        | DomainError::Auth { message } => (StatusCode::BAD_REQUEST, message.clone(), Value::Null),
        DomainError::Permission { message } => {
            (StatusCode::UNAUTHORIZED, message.clone(), Value::Null)
        }
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, e.to_string(), Value::Null),
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Internal error occurred");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_owned(),
                Value::Null,
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (code, message, data) = match self {
            Self::Domain(e) => domain_error_parts(&e),
            Self::Unauthenticated(message) => (StatusCode::UNAUTHORIZED, message, Value::Null),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message, Value::Null),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message, Value::Null),
        };
        respond(code, Some(&message), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::messages;
    use http_body_util::BodyExt;
    use uuid::Uuid;

    async fn render(e: ApiError) -> (StatusCode, Value) {
        let resp = e.into_response();
        let code = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (code, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn field_validation_carries_field_map() {
        let (code, body) = render(
            DomainError::field("title", messages::BUG_TITLE_TAKEN).into(),
        )
        .await;
        assert_eq!(code, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], messages::BUG_TITLE_TAKEN);
        assert_eq!(body["data"]["title"][0], messages::BUG_TITLE_TAKEN);
    }

    #[tokio::test]
    async fn status_mapping() {
        let id = Uuid::now_v7();
        let cases = [
            (DomainError::validation(messages::SELF_ASSIGNMENT), StatusCode::BAD_REQUEST),
            (DomainError::auth(messages::INVALID_CREDENTIALS), StatusCode::BAD_REQUEST),
            (DomainError::permission(messages::NOT_BUG_CREATOR), StatusCode::UNAUTHORIZED),
            (DomainError::not_found("Bug", id), StatusCode::NOT_FOUND),
            (DomainError::database("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let (code, body) = render(err.into()).await;
            assert_eq!(code, expected);
            assert_eq!(body["status"], false);
        }
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let (_, body) = render(DomainError::database("secret dsn").into()).await;
        assert!(!body.to_string().contains("secret dsn"));
    }

    #[tokio::test]
    async fn unauthenticated_is_401() {
        let (code, body) = render(ApiError::Unauthenticated("Invalid token.".to_owned())).await;
        assert_eq!(code, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token.");
    }
}
