//! GeoJSON export of drawn features.

use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;

use crate::feature::MapFeature;

/// Single-ring polygon; positions are `[lon, lat]`.
fn ring_to_polygon(feature: &MapFeature) -> Value {
    let exterior: Vec<Vec<f64>> = feature
        .geometry
        .points()
        .iter()
        .map(|[lon, lat]| vec![*lon, *lat])
        .collect();
    Value::Polygon(vec![exterior])
}

/// Record attributes plus the resolved popup. The boundary is left out; it
/// lives in `geometry`.
fn feature_properties(feature: &MapFeature) -> Result<JsonObject, serde_json::Error> {
    let mut properties = match serde_json::to_value(&feature.attributes)? {
        serde_json::Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    properties.remove("boundary");
    properties.insert("popupTitle".to_owned(), json!(feature.popup.title));
    properties.insert("popupHtml".to_owned(), json!(feature.popup.to_html()));
    Ok(properties)
}

/// Feature ids are input positions, so draw order survives a round trip.
pub fn to_geojson_feature(
    index: usize,
    feature: &MapFeature,
) -> Result<Feature, serde_json::Error> {
    let mut foreign_members = JsonObject::new();
    foreign_members.insert("style".to_owned(), serde_json::to_value(feature.style)?);

    Ok(Feature {
        bbox: None,
        geometry: Some(Geometry::new(ring_to_polygon(feature))),
        id: Some(Id::Number(index.into())),
        properties: Some(feature_properties(feature)?),
        foreign_members: Some(foreign_members),
    })
}

pub fn feature_collection<'a>(
    features: impl IntoIterator<Item = &'a MapFeature>,
) -> Result<FeatureCollection, serde_json::Error> {
    let features = features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| to_geojson_feature(index, feature))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}
