//! Minimal contract with the map toolkit, and the one-shot initialization
//! that populates it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::country::{CountryRecord, Position, validate_all};
use crate::error::{InitError, SurfaceError};
use crate::feature::{MapFeature, build_feature};

pub const DEFAULT_BASEMAP: &str = "topo-vector";
pub const DEFAULT_CONTAINER: &str = "viewDiv";
pub const DEFAULT_CENTER: Position = [0.0, 20.0];
pub const DEFAULT_ZOOM: u8 = 2;
pub const COUNTRIES_LAYER_TITLE: &str = "Países";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewHandle(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerHandle(pub usize);

/// Initial camera and basemap for a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub container: String,
    pub basemap: String,
    pub center: Position,
    pub zoom: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            container: DEFAULT_CONTAINER.to_owned(),
            basemap: DEFAULT_BASEMAP.to_owned(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub title: String,
}

impl LayerSpec {
    pub fn graphics(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// Anything that can show views, ordered layers and features.
///
/// Layers keep features in insertion order; later features win hit tests
/// where geometries overlap.
pub trait RenderingSurface {
    fn create_view(&mut self, config: &ViewConfig) -> Result<ViewHandle, SurfaceError>;

    fn add_layer(&mut self, view: ViewHandle, layer: LayerSpec)
    -> Result<LayerHandle, SurfaceError>;

    fn add_feature(&mut self, layer: LayerHandle, feature: MapFeature)
    -> Result<(), SurfaceError>;
}

/// Validates every record, then creates the view and its country layer and
/// adds one feature per record in input order.
///
/// Nothing touches the surface when a record is malformed.
pub fn initialize<S: RenderingSurface + ?Sized>(
    surface: &mut S,
    config: &ViewConfig,
    records: &[CountryRecord],
) -> Result<ViewHandle, InitError> {
    validate_all(records)?;

    let view = surface.create_view(config)?;
    let layer = surface.add_layer(view, LayerSpec::graphics(COUNTRIES_LAYER_TITLE))?;

    for record in records {
        let feature = build_feature(record);
        debug!(country = %record.name, points = feature.geometry.len(), "adding country feature");
        surface.add_feature(layer, feature)?;
    }

    info!(
        countries = records.len(),
        basemap = %config.basemap,
        "map view initialized"
    );
    Ok(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::builtin_countries;
    use crate::error::RecordError;
    use crate::scene::SceneSurface;
    use crate::style::POPUP_HIT_AREA;

    /// Accepts the view and layer, then refuses features past a limit.
    struct FlakySurface {
        inner: SceneSurface,
        accept: usize,
    }

    impl RenderingSurface for FlakySurface {
        fn create_view(&mut self, config: &ViewConfig) -> Result<ViewHandle, SurfaceError> {
            self.inner.create_view(config)
        }

        fn add_layer(
            &mut self,
            view: ViewHandle,
            layer: LayerSpec,
        ) -> Result<LayerHandle, SurfaceError> {
            self.inner.add_layer(view, layer)
        }

        fn add_feature(
            &mut self,
            layer: LayerHandle,
            feature: MapFeature,
        ) -> Result<(), SurfaceError> {
            if self.inner.feature_count() >= self.accept {
                return Err(SurfaceError::FeatureRejected {
                    feature: feature.name().to_owned(),
                    reason: "layer full".into(),
                });
            }
            self.inner.add_feature(layer, feature)
        }
    }

    struct NoViews;

    impl RenderingSurface for NoViews {
        fn create_view(&mut self, _config: &ViewConfig) -> Result<ViewHandle, SurfaceError> {
            Err(SurfaceError::ViewRejected("no display".into()))
        }

        fn add_layer(
            &mut self,
            view: ViewHandle,
            _layer: LayerSpec,
        ) -> Result<LayerHandle, SurfaceError> {
            Err(SurfaceError::UnknownView(view))
        }

        fn add_feature(
            &mut self,
            layer: LayerHandle,
            _feature: MapFeature,
        ) -> Result<(), SurfaceError> {
            Err(SurfaceError::UnknownLayer(layer))
        }
    }

    #[test]
    fn initialize_adds_one_feature_per_record_in_order() {
        let records = builtin_countries();
        let mut surface = SceneSurface::default();
        let view = initialize(&mut surface, &ViewConfig::default(), &records)
            .expect("builtin dataset initializes");

        let scene = surface.scene(view).expect("scene for created view");
        assert_eq!(scene.view, ViewConfig::default());
        assert_eq!(scene.layers.len(), 1);
        assert_eq!(scene.layers[0].title, COUNTRIES_LAYER_TITLE);

        let features = &scene.layers[0].features;
        assert_eq!(features.len(), records.len());
        for (feature, record) in features.iter().zip(&records) {
            assert_eq!(&feature.attributes, record);
            assert_eq!(feature.geometry, record.boundary);
            assert_eq!(feature.style, POPUP_HIT_AREA);
        }
    }

    #[test]
    fn open_ring_fails_before_anything_reaches_the_surface() {
        let mut records = builtin_countries();
        let ring = &mut records[2].boundary.0;
        let last = ring.len() - 1;
        ring[last] = [0.0, 0.0];

        let mut surface = SceneSurface::default();
        let err = initialize(&mut surface, &ViewConfig::default(), &records)
            .expect_err("open ring must fail");

        assert!(matches!(
            err,
            InitError::MalformedRecord(RecordError::RingNotClosed { ref country }) if country == "Brasil"
        ));
        assert_eq!(surface.view_count(), 0);
        assert_eq!(surface.feature_count(), 0);
    }

    #[test]
    fn surface_errors_propagate() {
        let mut surface = FlakySurface {
            inner: SceneSurface::default(),
            accept: 1,
        };
        let err = initialize(&mut surface, &ViewConfig::default(), &builtin_countries())
            .expect_err("second feature is refused");
        assert!(matches!(
            err,
            InitError::Surface(SurfaceError::FeatureRejected { ref feature, .. }) if feature == "Argentina"
        ));
    }

    #[test]
    fn view_failure_is_reported() {
        let err = initialize(&mut NoViews, &ViewConfig::default(), &builtin_countries())
            .expect_err("view creation fails");
        assert!(matches!(err, InitError::Surface(SurfaceError::ViewRejected(_))));
    }

    #[test]
    fn empty_dataset_still_creates_an_empty_layer() {
        let mut surface = SceneSurface::default();
        let view = initialize(&mut surface, &ViewConfig::default(), &[]).expect("empty is fine");
        let scene = surface.scene(view).expect("scene");
        assert!(scene.layers[0].features.is_empty());
    }
}
