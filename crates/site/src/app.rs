//! Router assembly and the HTTP middleware stack.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    extract::{ConnectInfo, Request},
    http::{Response, StatusCode, header::USER_AGENT},
    middleware::from_fn,
};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::load_shed::{LoadShedLayer, error::Overloaded};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    timeout::TimeoutLayer,
    trace::{DefaultOnResponse, OnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::middleware::{client_ip, request_id_middleware, security_headers_middleware};
use crate::routes::{self, pages};
use crate::state::AppState;
use crate::static_files;

/// Requests allowed in flight at once across the whole server.
pub const MAX_IN_FLIGHT_REQUESTS: usize = 100;

/// Per-request processing deadline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config().static_dir.clone();

    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(REQUEST_TIMEOUT);

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_files::service(static_dir))
        .fallback(pages::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(shed_overload))
                .layer(LoadShedLayer::new())
                .layer(GlobalConcurrencyLimitLayer::new(MAX_IN_FLIGHT_REQUESTS)),
        )
        .layer(timeout)
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .on_response(response, latency, span);
                    },
                ),
        )
        .layer(from_fn(security_headers_middleware))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Requests beyond the in-flight cap are turned away instead of queued.
async fn shed_overload(err: BoxError) -> (StatusCode, &'static str) {
    if err.is::<Overloaded>() {
        tracing::warn!("In-flight request limit reached, shedding request");
        (StatusCode::TOO_MANY_REQUESTS, "Too Many Requests")
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

fn make_request_span(request: &Request) -> Span {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), peer)
        .map_or_else(|| "unknown".to_string(), |ip| ip.to_string());
    let user_agent = request
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        client_ip = %ip,
        user_agent = %user_agent,
        request_id = tracing::field::Empty,
        status = tracing::field::Empty,
        latency_ms = tracing::field::Empty,
    )
}
