use axum::Router;
use axum::routing::get;
use tower_http::compression::CompressionLayer;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::page::index))
        .route("/index.html", get(routes::page::index))
        .route("/api/scene", get(routes::api::get_scene))
        .route("/api/features", get(routes::api::get_features))
        .route("/api/countries", get(routes::api::list_countries))
        .route("/api/countries/{name}", get(routes::api::get_country))
        .route("/api/health", get(routes::api::health))
        .route("/api/metrics", get(routes::api::metrics))
        .layer(CompressionLayer::new())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use atlas_shared::{CountryCatalog, ViewConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::build_app;
    use crate::state::AppState;

    fn app() -> axum::Router {
        let state = AppState::build(CountryCatalog::builtin(), &ViewConfig::default())
            .expect("builtin catalog builds a scene");
        build_app(state)
    }

    #[tokio::test]
    async fn index_serves_html_with_inlined_scene() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).expect("request"))
            .await
            .expect("index response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/html; charset=utf-8")
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let html = String::from_utf8(body.to_vec()).expect("utf-8 page");
        assert!(html.contains(r#""basemap":"topo-vector""#));
        assert!(html.contains(r#""title":"Chile""#));
        assert!(html.contains("Cóndor andino"));
        assert!(!html.contains("/* SCENE */"));
    }

    #[tokio::test]
    async fn invalid_country_name_is_bad_request() {
        let response = app()
            .oneshot(
                Request::get("/api/countries/%20%20")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = app()
            .oneshot(Request::get("/api/nope").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
