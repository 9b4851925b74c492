use serde::{Deserialize, Serialize};

use crate::country::{CountryRecord, Ring};
use crate::popup::{COUNTRY_POPUP, PopupContent};
use crate::style::{FillStyle, POPUP_HIT_AREA};

/// Drawable country: geometry, style, attributes and popup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    pub geometry: Ring,
    pub style: FillStyle,
    pub attributes: CountryRecord,
    pub popup: PopupContent,
}

impl MapFeature {
    pub fn name(&self) -> &str {
        &self.attributes.name
    }
}

/// Builds the feature for one record. The boundary is copied as-is; callers
/// validate records first (see [`crate::country::validate_all`]).
pub fn build_feature(record: &CountryRecord) -> MapFeature {
    MapFeature {
        geometry: record.boundary.clone(),
        style: POPUP_HIT_AREA,
        attributes: record.clone(),
        popup: COUNTRY_POPUP.render(record),
    }
}

pub fn build_features(records: &[CountryRecord]) -> Vec<MapFeature> {
    records.iter().map(build_feature).collect()
}
