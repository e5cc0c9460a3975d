//! Health check endpoints.

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::CACHE_CONTROL},
    response::IntoResponse,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::db;
use crate::state::AppState;

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub uptime: String,
}

/// Readiness payload.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = HealthResponse {
        status: "healthy",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_uptime(state.uptime()),
    };

    ([(CACHE_CONTROL, "no-cache")], Json(body))
}

/// GET /health/ready
///
/// 503 until the database answers.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let (status, label) = match db::ping(state.pool()).await {
        Ok(()) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        [(CACHE_CONTROL, "no-cache")],
        Json(ReadyResponse { status: label }),
    )
}

/// Render `d` as `1h2m3s`, omitting leading zero units.
fn format_uptime(d: Duration) -> String {
    let total = d.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}
