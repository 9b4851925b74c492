use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::Response;

use crate::config::PAGE_CACHE_CONTROL;
use crate::routes::api::{bytes_response, if_none_match_matches, not_modified_response};
use crate::state::AppState;

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");
const SCENE_MARKER: &str = "/* SCENE */";

/// Inlines the scene JSON into the page so the browser boots the map without
/// a second request.
pub fn render_index(scene_json: &[u8]) -> String {
    let json = String::from_utf8_lossy(scene_json);
    INDEX_TEMPLATE.replacen(SCENE_MARKER, &script_safe(&json), 1)
}

/// `</` cannot appear inside a `<script>` element; `<\/` is the same JSON
/// string.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    state.observability.record_page_request();
    let page = &state.index_html;

    if if_none_match_matches(&headers, &page.etag) {
        state.observability.record_not_modified();
        return not_modified_response(PAGE_CACHE_CONTROL, Some(page.etag.as_str()));
    }

    bytes_response(
        page.body.clone(),
        HeaderValue::from_static("text/html; charset=utf-8"),
        PAGE_CACHE_CONTROL,
        Some(page.etag.as_str()),
    )
}
