use serde::{Deserialize, Serialize};

use crate::error::SurfaceError;
use crate::feature::MapFeature;
use crate::surface::{LayerHandle, LayerSpec, RenderingSurface, ViewConfig, ViewHandle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayer {
    pub title: String,
    pub features: Vec<MapFeature>,
}

/// Everything drawn on one view, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub view: ViewConfig,
    pub layers: Vec<SceneLayer>,
}

impl Scene {
    pub fn features(&self) -> impl Iterator<Item = &MapFeature> {
        self.layers.iter().flat_map(|layer| layer.features.iter())
    }

    pub fn feature_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.features.len()).sum()
    }
}

#[derive(Debug)]
struct LayerEntry {
    view: ViewHandle,
    layer: SceneLayer,
}

/// In-memory surface that records what would be drawn.
#[derive(Debug, Default)]
pub struct SceneSurface {
    views: Vec<ViewConfig>,
    layers: Vec<LayerEntry>,
}

impl SceneSurface {
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn feature_count(&self) -> usize {
        self.layers.iter().map(|entry| entry.layer.features.len()).sum()
    }

    /// Snapshot of one view with its layers in the order they were added.
    pub fn scene(&self, view: ViewHandle) -> Option<Scene> {
        let config = self.views.get(view.0)?;
        Some(Scene {
            view: config.clone(),
            layers: self
                .layers
                .iter()
                .filter(|entry| entry.view == view)
                .map(|entry| entry.layer.clone())
                .collect(),
        })
    }

    pub fn into_scene(mut self, view: ViewHandle) -> Option<Scene> {
        let config = self.views.get(view.0)?.clone();
        let layers = std::mem::take(&mut self.layers)
            .into_iter()
            .filter(|entry| entry.view == view)
            .map(|entry| entry.layer)
            .collect();
        Some(Scene {
            view: config,
            layers,
        })
    }
}

impl RenderingSurface for SceneSurface {
    fn create_view(&mut self, config: &ViewConfig) -> Result<ViewHandle, SurfaceError> {
        if config.zoom > 24 {
            return Err(SurfaceError::ViewRejected(format!(
                "zoom {} out of range 0..=24",
                config.zoom
            )));
        }
        let [lon, lat] = config.center;
        if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
            return Err(SurfaceError::ViewRejected(format!(
                "center ({lon}, {lat}) is not a valid longitude/latitude"
            )));
        }
        self.views.push(config.clone());
        Ok(ViewHandle(self.views.len() - 1))
    }

    fn add_layer(
        &mut self,
        view: ViewHandle,
        layer: LayerSpec,
    ) -> Result<LayerHandle, SurfaceError> {
        if view.0 >= self.views.len() {
            return Err(SurfaceError::UnknownView(view));
        }
        self.layers.push(LayerEntry {
            view,
            layer: SceneLayer {
                title: layer.title,
                features: Vec::new(),
            },
        });
        Ok(LayerHandle(self.layers.len() - 1))
    }

    fn add_feature(
        &mut self,
        layer: LayerHandle,
        feature: MapFeature,
    ) -> Result<(), SurfaceError> {
        let entry = self
            .layers
            .get_mut(layer.0)
            .ok_or(SurfaceError::UnknownLayer(layer))?;
        entry.layer.features.push(feature);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::builtin_countries;
    use crate::feature::build_feature;

    #[test]
    fn unknown_handles_are_rejected() {
        let mut surface = SceneSurface::default();
        assert_eq!(
            surface.add_layer(ViewHandle(0), LayerSpec::graphics("x")),
            Err(SurfaceError::UnknownView(ViewHandle(0)))
        );
        let feature = build_feature(&builtin_countries()[0]);
        assert_eq!(
            surface.add_feature(LayerHandle(3), feature),
            Err(SurfaceError::UnknownLayer(LayerHandle(3)))
        );
    }

    #[test]
    fn invalid_camera_is_rejected() {
        let mut surface = SceneSurface::default();
        let config = ViewConfig {
            center: [200.0, 0.0],
            ..ViewConfig::default()
        };
        assert!(matches!(
            surface.create_view(&config),
            Err(SurfaceError::ViewRejected(_))
        ));
        let config = ViewConfig {
            zoom: 30,
            ..ViewConfig::default()
        };
        assert!(surface.create_view(&config).is_err());
        assert_eq!(surface.view_count(), 0);
    }

    #[test]
    fn scenes_only_contain_their_own_layers() {
        let mut surface = SceneSurface::default();
        let first = surface.create_view(&ViewConfig::default()).expect("view");
        let second = surface.create_view(&ViewConfig::default()).expect("view");
        let layer = surface
            .add_layer(second, LayerSpec::graphics("second"))
            .expect("layer");
        surface
            .add_feature(layer, build_feature(&builtin_countries()[1]))
            .expect("feature");

        assert_eq!(surface.scene(first).expect("scene").layers.len(), 0);
        let scene = surface.into_scene(second).expect("scene");
        assert_eq!(scene.feature_count(), 1);
        assert_eq!(
            scene.features().next().map(MapFeature::name),
            Some("Argentina")
        );
    }
}
