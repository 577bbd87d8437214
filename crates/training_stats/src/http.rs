//! HTTP surface: routes, query parsing and correlation-id propagation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, Request, State};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::timeout::TimeoutLayer;
use training_session_client::http_client::CORRELATION_ID_HEADER;
use uuid::Uuid;

use crate::domains::dates::parse_day;
use crate::error::{StatsError, StatsResult};
use crate::services::StatsService;
use crate::types::{DurationsResponse, IntensityResponse};

pub struct AppState {
    pub service: StatsService,
    pub default_days: u32,
    /// Widest window, in days before today, a single request may cover.
    pub max_days: u32,
    pub metrics: Option<PrometheusHandle>,
}

/// Correlation id of the current request, forwarded to every upstream call.
#[derive(Clone, Debug)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reuse the caller's `x-correlation-id` or mint one, and echo it back.
pub async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let cid = request
        .headers()
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    request.extensions_mut().insert(CorrelationId(cid.clone()));

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&cid) {
        response.headers_mut().insert(CORRELATION_ID_HEADER, value);
    }
    response
}

pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .route("/durations", get(get_durations))
        .route("/intensity", get(get_intensity))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::from_fn(correlation_id_middleware))
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn metrics_endpoint(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [("content-type", "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics disabled").into_response(),
    }
}

async fn get_durations(
    State(state): State<Arc<AppState>>,
    Extension(cid): Extension<CorrelationId>,
    Query(params): Query<HashMap<String, String>>,
) -> StatsResult<Json<DurationsResponse>> {
    let date_from = date_from_param(&params)?;
    check_window(date_from, state.service.today(), state.max_days)?;
    let durations = state
        .service
        .durations(date_from, cid.as_str())
        .await
        .inspect_err(|e| tracing::warn!(correlation_id = %cid.as_str(), error = %e, "durations failed"))?;
    Ok(Json(DurationsResponse { durations }))
}

async fn get_intensity(
    State(state): State<Arc<AppState>>,
    Extension(cid): Extension<CorrelationId>,
    Query(params): Query<HashMap<String, String>>,
) -> StatsResult<Json<IntensityResponse>> {
    let days = days_param(&params, state.default_days, state.max_days)?;
    let days = state
        .service
        .intensity(days, cid.as_str())
        .await
        .inspect_err(|e| tracing::warn!(correlation_id = %cid.as_str(), error = %e, "intensity failed"))?;
    Ok(Json(IntensityResponse { days }))
}

fn date_from_param(params: &HashMap<String, String>) -> StatsResult<NaiveDate> {
    let raw = params
        .get("dateFrom")
        .ok_or(StatsError::MissingInput("dateFrom"))?;
    parse_day(raw).ok_or_else(|| {
        StatsError::InvalidInput(format!("\"dateFrom\" must be a YYYYMMDD date, got {raw:?}"))
    })
}

/// A present `days` value is used as-is, including zero, up to `max_days`.
fn days_param(
    params: &HashMap<String, String>,
    default_days: u32,
    max_days: u32,
) -> StatsResult<u32> {
    let Some(raw) = params.get("days") else {
        return Ok(default_days);
    };
    let days = raw.trim().parse::<u32>().map_err(|_| {
        StatsError::InvalidInput(format!(
            "\"days\" must be a non-negative integer, got {raw:?}"
        ))
    })?;
    if days > max_days {
        return Err(StatsError::InvalidInput(format!(
            "\"days\" must be at most {max_days}, got {days}"
        )));
    }
    Ok(days)
}

/// Rejects a `dateFrom` more than `max_days` before today. Later dates are fine.
fn check_window(date_from: NaiveDate, today: NaiveDate, max_days: u32) -> StatsResult<()> {
    let span = today.signed_duration_since(date_from).num_days();
    if span > i64::from(max_days) {
        return Err(StatsError::InvalidInput(format!(
            "\"dateFrom\" may be at most {max_days} days before today, got {span}"
        )));
    }
    Ok(())
}
