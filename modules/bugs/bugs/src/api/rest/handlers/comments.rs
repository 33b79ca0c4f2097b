use axum::Extension;
use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use bugs_sdk::SecurityContext;

use super::parse_id;
use crate::api::rest::dto::{CommentDto, CreateCommentReq};
use crate::api::rest::envelope::{created, no_content};
use crate::api::rest::error::ApiResult;
use crate::module::ConcreteAppServices;

pub async fn create_comment(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<ConcreteAppServices>,
    body: Result<Json<CreateCommentReq>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body?;
    let comment = svc.comments.create_comment(&ctx, req.into()).await?;
    Ok(created(CommentDto::from(comment)))
}

pub async fn delete_comment(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<ConcreteAppServices>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    svc.comments.delete_comment(&ctx, id).await?;
    Ok(no_content())
}
