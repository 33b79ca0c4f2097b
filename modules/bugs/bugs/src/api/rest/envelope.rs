use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub const SUCCESS: &str = "successful";
pub const FAILURE: &str = "failed";

/// Wrapper every JSON body is sent in. `status` mirrors whether the HTTP status is < 400.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: bool,
    pub message: String,
    pub data: T,
}

/// Build an enveloped JSON response.
pub fn respond<T: Serialize>(code: StatusCode, message: Option<&str>, data: T) -> Response {
    let status = code.as_u16() < 400;
    let message = message
        .map(str::to_owned)
        .unwrap_or_else(|| if status { SUCCESS } else { FAILURE }.to_owned());
    (
        code,
        Json(Envelope {
            status,
            message,
            data,
        }),
    )
        .into_response()
}

pub fn ok<T: Serialize>(data: T) -> Response {
    respond(StatusCode::OK, None, data)
}

pub fn created<T: Serialize>(data: T) -> Response {
    respond(StatusCode::CREATED, None, data)
}

/// 204 responses carry no body.
pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn success_defaults() {
        let resp = ok(serde_json::json!([1, 2]));
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(
            body,
            serde_json::json!({"status": true, "message": "successful", "data": [1, 2]})
        );
    }

    #[tokio::test]
    async fn failure_defaults() {
        let resp = respond(StatusCode::NOT_FOUND, None, serde_json::Value::Null);
        let body = body_json(resp).await;
        assert_eq!(body["status"], false);
        assert_eq!(body["message"], "failed");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn custom_message_is_kept() {
        let resp = respond(StatusCode::OK, Some("Login is successful"), ());
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Login is successful");
        assert!(body["data"].is_null());
    }

    #[test]
    fn no_content_is_empty() {
        assert_eq!(no_content().status(), StatusCode::NO_CONTENT);
    }
}
