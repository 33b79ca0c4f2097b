use axum::Extension;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use bugs_sdk::SecurityContext;
use tracing::info;

use crate::api::rest::dto::{SignInDto, SignInReq, SignUpReq, UserDto};
use crate::api::rest::envelope::respond;
use crate::api::rest::error::ApiResult;
use crate::module::ConcreteAppServices;

pub async fn sign_up(
    Extension(svc): Extension<ConcreteAppServices>,
    body: Result<Json<SignUpReq>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body?;
    let user = svc.users.sign_up(req.into()).await?;
    Ok(respond(
        StatusCode::CREATED,
        Some("account has been created successfully"),
        UserDto::from(user),
    ))
}

pub async fn sign_in(
    Extension(svc): Extension<ConcreteAppServices>,
    body: Result<Json<SignInReq>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body?;
    let session = svc.sessions.sign_in(req.into()).await?;
    let dto = SignInDto {
        user: session.user.into(),
        token: session.token,
    };
    Ok(respond(StatusCode::OK, Some("Login is successful"), dto))
}

pub async fn sign_out(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<ConcreteAppServices>,
) -> ApiResult<Response> {
    info!(user.id = %ctx.subject_id(), "Signing out");
    svc.sessions.sign_out(&ctx).await?;
    Ok(respond(
        StatusCode::OK,
        Some("you have been logged out successfully"),
        (),
    ))
}
