use axum::Extension;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::response::Response;
use bugs_sdk::{BugPatch, SecurityContext, UpdateBugRequest};
use tracing::info;

use super::parse_id;
use crate::api::rest::dto::{BugDetailDto, BugListItemDto, BugListQuery, CreateBugReq, UpdateBugReq};
use crate::api::rest::envelope::{created, no_content, ok};
use crate::api::rest::error::ApiResult;
use crate::domain::filter::parse_bug_filter;
use crate::module::ConcreteAppServices;

pub async fn list_bugs(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<ConcreteAppServices>,
    query: Result<Query<BugListQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(query) = query?;
    let filter = parse_bug_filter(
        query.resolved.as_deref(),
        query.assigner.as_deref(),
        query.assignee.as_deref(),
    )?;
    let bugs = svc.bugs.list_bugs(&ctx, filter).await?;
    let items: Vec<BugListItemDto> = bugs.into_iter().map(Into::into).collect();
    Ok(ok(items))
}

pub async fn get_bug(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<ConcreteAppServices>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    let detail = svc.bugs.get_bug(&ctx, id).await?;
    Ok(ok(BugDetailDto::from(detail)))
}

pub async fn create_bug(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<ConcreteAppServices>,
    body: Result<Json<CreateBugReq>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(req) = body?;
    let detail = svc.bugs.create_bug(&ctx, req.into()).await?;
    Ok(created(BugDetailDto::from(detail)))
}

pub async fn update_bug(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<ConcreteAppServices>,
    Path(id): Path<String>,
    body: Result<Json<UpdateBugReq>, JsonRejection>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    let Json(req) = body?;
    let patch = BugPatch::try_from(req)?;
    info!(bug.id = %id, updater.id = %ctx.subject_id(), "Updating bug");
    let detail = svc
        .bugs
        .update_bug(
            &ctx,
            UpdateBugRequest { id, patch },
        )
        .await?;
    Ok(ok(BugDetailDto::from(detail)))
}

pub async fn delete_bug(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<ConcreteAppServices>,
    Path(id): Path<String>,
) -> ApiResult<Response> {
    let id = parse_id(&id)?;
    svc.bugs.delete_bug(&ctx, id).await?;
    Ok(no_content())
}
