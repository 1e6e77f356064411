use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State as AxumState},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use summit_geo::Coordinate;
use summit_peaks::{Peak, PeakCatalog, PeakMatch};
use summit_telemetry::{metrics, MetricsSnapshot, Timer};

use crate::{error::AppError, state::State};

type AppState = AxumState<Arc<State>>;

#[derive(Debug, Deserialize)]
pub struct FindParams {
    pub latitude: f64,
    pub longitude: f64,
    pub max_distance: Option<f64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct NearestParams {
    pub latitude: f64,
    pub longitude: f64,
    pub max_distance: Option<f64>,
}

pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "service": "summit-server",
    }))
}

pub async fn metrics_handler() -> Json<MetricsSnapshot> {
    Json(metrics().snapshot())
}

pub async fn list_peaks_handler(AxumState(state): AppState) -> Result<Json<Vec<Peak>>, AppError> {
    metrics().increment("peaks.list.requests");
    let peaks = tokio::task::spawn_blocking(move || state.matcher.catalog().get_all_peaks()).await??;
    Ok(Json(peaks))
}

pub async fn get_peak_handler(
    AxumState(state): AppState,
    Path(id): Path<i64>,
) -> Result<Json<Peak>, AppError> {
    metrics().increment("peaks.get.requests");
    let peak = tokio::task::spawn_blocking(move || state.matcher.catalog().get_peak(id)).await??;
    peak.map(Json).ok_or_else(|| AppError::not_found(id))
}

/// Ranked matches; without `max_distance` the whole catalog is ranked.
pub async fn find_peaks_handler(
    AxumState(state): AppState,
    query: Result<Query<FindParams>, QueryRejection>,
) -> Result<Json<Vec<PeakMatch>>, AppError> {
    metrics().increment("peaks.find.requests");
    let Query(params) = query?;

    let limit = match params.limit {
        None => state.defaults.default_limit,
        Some(limit) if limit >= 1 => usize::try_from(limit).unwrap_or(usize::MAX),
        Some(limit) => return Err(AppError::bad_request(format!("limit must be at least 1, got {limit}"))),
    };
    let point = Coordinate::new(params.latitude, params.longitude);

    let timer = Timer::start("peaks.find.latency_ms");
    let matches = tokio::task::spawn_blocking(move || {
        state.matcher.find_nearest_n(point, params.max_distance, limit)
    })
    .await??;
    timer.stop();

    Ok(Json(matches))
}

/// Single best match within `max_distance`, or the configured default radius.
pub async fn nearest_peak_handler(
    AxumState(state): AppState,
    query: Result<Query<NearestParams>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    metrics().increment("peaks.nearest.requests");
    let Query(params) = query?;

    let max_distance = params.max_distance.unwrap_or(state.defaults.default_max_distance_m);
    let point = Coordinate::new(params.latitude, params.longitude);

    let timer = Timer::start("peaks.nearest.latency_ms");
    let found = tokio::task::spawn_blocking(move || state.matcher.find_nearest(point, Some(max_distance))).await??;
    timer.stop();

    if found.is_none() {
        metrics().increment("peaks.nearest.no_match");
    }
    Ok(Json(json!({ "match": found })))
}
