use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use atlas_shared::export::feature_collection;
use atlas_shared::{CountryCatalog, InitError, Scene, SceneSurface, ViewConfig, initialize};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::routes::page;

/// Pre-serialized payload with a content ETag, built once at startup.
#[derive(Debug, Clone)]
pub struct Payload {
    pub body: Bytes,
    pub etag: String,
}

impl Payload {
    pub fn new(kind: &str, body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let etag = format!("\"{kind}-{:08x}\"", crc32fast::hash(&body));
        Self { body, etag }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CountryCatalog>,
    pub scene: Arc<Scene>,
    pub scene_json: Arc<Payload>,
    pub features_json: Arc<Payload>,
    pub index_html: Arc<Payload>,
    pub started_at: DateTime<Utc>,
    pub observability: Arc<ObservabilityCounters>,
}

#[derive(Debug, Default)]
pub struct ObservabilityCounters {
    page_requests_total: AtomicU64,
    scene_requests_total: AtomicU64,
    features_requests_total: AtomicU64,
    country_lookups_total: AtomicU64,
    country_lookup_misses_total: AtomicU64,
    not_modified_total: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ObservabilitySnapshot {
    pub page_requests_total: u64,
    pub scene_requests_total: u64,
    pub features_requests_total: u64,
    pub country_lookups_total: u64,
    pub country_lookup_misses_total: u64,
    pub not_modified_total: u64,
}

impl ObservabilityCounters {
    pub fn snapshot(&self) -> ObservabilitySnapshot {
        ObservabilitySnapshot {
            page_requests_total: self.page_requests_total.load(Ordering::Relaxed),
            scene_requests_total: self.scene_requests_total.load(Ordering::Relaxed),
            features_requests_total: self.features_requests_total.load(Ordering::Relaxed),
            country_lookups_total: self.country_lookups_total.load(Ordering::Relaxed),
            country_lookup_misses_total: self.country_lookup_misses_total.load(Ordering::Relaxed),
            not_modified_total: self.not_modified_total.load(Ordering::Relaxed),
        }
    }

    pub fn record_page_request(&self) {
        self.page_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_scene_request(&self) {
        self.scene_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_features_request(&self) {
        self.features_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_country_lookup(&self, found: bool) {
        self.country_lookups_total.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.country_lookup_misses_total
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_not_modified(&self) {
        self.not_modified_total.fetch_add(1, Ordering::Relaxed);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Init(#[from] InitError),
    #[error("initialized view has no scene")]
    MissingScene,
    #[error("failed to serialize scene: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppState {
    /// Runs map initialization once against an in-memory scene and caches
    /// every payload the routes serve.
    pub fn build(catalog: CountryCatalog, view: &ViewConfig) -> Result<Self, StateError> {
        let mut surface = SceneSurface::default();
        let handle = initialize(&mut surface, view, catalog.all())?;
        let scene = surface
            .into_scene(handle)
            .ok_or(StateError::MissingScene)?;

        let scene_json = serde_json::to_vec(&scene)?;
        let features_json = serde_json::to_vec(&feature_collection(scene.features())?)?;
        let index_html = page::render_index(&scene_json);

        info!(
            countries = catalog.len(),
            features = scene.feature_count(),
            scene_bytes = scene_json.len(),
            "map scene prepared"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            scene: Arc::new(scene),
            scene_json: Arc::new(Payload::new("scene", scene_json)),
            features_json: Arc::new(Payload::new("features", features_json)),
            index_html: Arc::new(Payload::new("index", index_html)),
            started_at: Utc::now(),
            observability: Arc::new(ObservabilityCounters::default()),
        })
    }
}
