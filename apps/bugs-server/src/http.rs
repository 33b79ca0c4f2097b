//! HTTP stack around the module router.
//!
//! Requests pass through, outermost first: `SetRequestId` -> `PropagateRequestId` ->
//! Trace -> Timeout -> `BodyLimit` -> CORS (when enabled) -> routes.

use std::time::Duration;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, StatusCode};
use axum::response::Response;
use axum::routing::get;
use bugs::api::rest::envelope::respond;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::config::ServerConfig;
use crate::signals::wait_for_shutdown;

const REQUEST_ID: &str = "x-request-id";

async fn health_check() -> &'static str {
    "ok"
}

async fn not_found() -> Response {
    respond(StatusCode::NOT_FOUND, Some("Not found."), ())
}

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    path = %req.uri().path(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                    "user.id" = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    )
}

/// Mount `api` next to the health probe and wrap everything in the middleware stack.
pub fn build_app(api: Router, cfg: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(health_check))
        .merge(api)
        .fallback(not_found);

    if cfg.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router = router
        .layer(RequestBodyLimitLayer::new(cfg.body_limit_bytes))
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes));

    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        Duration::from_secs(cfg.request_timeout_secs),
    ));

    router = apply_trace_layer(router);

    let x_request_id = HeaderName::from_static(REQUEST_ID);
    router
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

/// Bind and serve until a shutdown signal arrives.
pub async fn serve(app: Router, cfg: &ServerConfig) -> Result<()> {
    let addr = cfg.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async {
        if let Err(e) = wait_for_shutdown().await {
            tracing::warn!(error = %e, "Signal waiter failed, falling back to ctrl_c()");
            let _ = tokio::signal::ctrl_c().await;
        }
        tracing::info!("HTTP server shutting down gracefully");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
