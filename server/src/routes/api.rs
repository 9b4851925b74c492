use std::fmt::Write as _;

use atlas_shared::COUNTRY_POPUP;
use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use chrono::Utc;

use crate::config::API_CACHE_CONTROL;
use crate::state::{AppState, ObservabilitySnapshot, Payload};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
const MAX_COUNTRY_NAME_LEN: usize = 64;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    let uptime_secs = Utc::now()
        .signed_duration_since(state.started_at)
        .num_seconds()
        .max(0);
    Json(serde_json::json!({
        "status": "ok",
        "countries": state.catalog.len(),
        "features": state.scene.feature_count(),
        "layers": state.scene.layers.len(),
        "basemap": state.scene.view.basemap,
        "started_at": state.started_at.to_rfc3339(),
        "uptime_secs": uptime_secs,
        "observability": {
            "page_requests_total": observability.page_requests_total,
            "scene_requests_total": observability.scene_requests_total,
            "features_requests_total": observability.features_requests_total,
            "country_lookups_total": observability.country_lookups_total,
            "country_lookup_misses_total": observability.country_lookup_misses_total,
            "not_modified_total": observability.not_modified_total,
        }
    }))
}

/// Serve the pre-serialized scene (view, layers, features).
pub async fn get_scene(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.observability.record_scene_request();
    conditional_json(&state, &headers, &state.scene_json)
}

/// Serve the pre-serialized GeoJSON FeatureCollection.
pub async fn get_features(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.observability.record_features_request();
    conditional_json(&state, &headers, &state.features_json)
}

pub async fn list_countries(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.names().map(str::to_owned).collect())
}

pub async fn get_country(
    State(state): State<AppState>,
    Path(raw_name): Path<String>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let name = normalize_country_name(&raw_name)?;

    let record = state.catalog.get(name);
    state.observability.record_country_lookup(record.is_some());
    let record = record.ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(serde_json::json!({
        "country": record,
        "popup": COUNTRY_POPUP.render(record),
    })))
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = render_prometheus_metrics(
        state.catalog.len(),
        state.scene.feature_count(),
        state.observability.snapshot(),
    );

    (
        [
            (header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
}

fn render_prometheus_metrics(
    country_count: usize,
    feature_count: usize,
    observability: ObservabilitySnapshot,
) -> String {
    let mut body = String::new();
    write_metric(
        &mut body,
        "atlas_countries",
        "gauge",
        "Number of countries loaded at startup.",
        country_count as u64,
    );
    write_metric(
        &mut body,
        "atlas_features",
        "gauge",
        "Number of features drawn on the map view.",
        feature_count as u64,
    );
    write_metric(
        &mut body,
        "atlas_page_requests_total",
        "counter",
        "Total map page requests.",
        observability.page_requests_total,
    );
    write_metric(
        &mut body,
        "atlas_scene_requests_total",
        "counter",
        "Total /api/scene requests.",
        observability.scene_requests_total,
    );
    write_metric(
        &mut body,
        "atlas_features_requests_total",
        "counter",
        "Total /api/features requests.",
        observability.features_requests_total,
    );
    write_metric(
        &mut body,
        "atlas_country_lookups_total",
        "counter",
        "Total single-country lookups.",
        observability.country_lookups_total,
    );
    write_metric(
        &mut body,
        "atlas_country_lookup_misses_total",
        "counter",
        "Single-country lookups for unknown names.",
        observability.country_lookup_misses_total,
    );
    write_metric(
        &mut body,
        "atlas_not_modified_total",
        "counter",
        "Responses answered with 304 Not Modified.",
        observability.not_modified_total,
    );
    body
}

fn write_metric(body: &mut String, name: &str, kind: &str, help: &str, value: u64) {
    let _ = writeln!(body, "# HELP {name} {help}");
    let _ = writeln!(body, "# TYPE {name} {kind}");
    let _ = writeln!(body, "{name} {value}");
}

fn normalize_country_name(name: &str) -> Result<&str, StatusCode> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_COUNTRY_NAME_LEN {
        return Err(StatusCode::BAD_REQUEST);
    }

    if trimmed
        .chars()
        .any(|ch| ch.is_control() || matches!(ch, '/' | '\\' | '?' | '#'))
    {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(trimmed)
}

fn conditional_json(state: &AppState, headers: &HeaderMap, payload: &Payload) -> Response {
    if if_none_match_matches(headers, &payload.etag) {
        state.observability.record_not_modified();
        return not_modified_response(API_CACHE_CONTROL, Some(payload.etag.as_str()));
    }

    bytes_response(
        payload.body.clone(),
        HeaderValue::from_static("application/json"),
        API_CACHE_CONTROL,
        Some(payload.etag.as_str()),
    )
}

pub(crate) fn bytes_response(
    body: Bytes,
    content_type: HeaderValue,
    cache_control: &'static str,
    etag: Option<&str>,
) -> Response {
    let mut response = Response::new(Body::from(body));
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

pub(crate) fn not_modified_response(cache_control: &'static str, etag: Option<&str>) -> Response {
    let mut response = StatusCode::NOT_MODIFIED.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    );
    if let Some(etag) = etag
        && let Ok(etag_header) = HeaderValue::from_str(etag)
    {
        headers.insert(header::ETAG, etag_header);
    }
    response
}

fn normalize_etag(candidate: &str) -> &str {
    candidate.strip_prefix("W/").unwrap_or(candidate).trim()
}

pub(crate) fn if_none_match_matches(headers: &HeaderMap, etag: &str) -> bool {
    let Some(value) = headers.get(header::IF_NONE_MATCH) else {
        return false;
    };
    let Ok(raw) = value.to_str() else {
        return false;
    };

    raw.split(',').any(|candidate| {
        let candidate = candidate.trim();
        candidate == "*" || normalize_etag(candidate) == normalize_etag(etag)
    })
}
