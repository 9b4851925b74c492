use thiserror::Error;

use crate::surface::{LayerHandle, ViewHandle};

/// A country record that cannot be turned into a feature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{country}: field `{field}` is blank")]
    BlankField {
        country: String,
        field: &'static str,
    },
    #[error("{country}: list field `{field}` is empty")]
    EmptyList {
        country: String,
        field: &'static str,
    },
    #[error("{country}: boundary ring has {points} points, need at least 4")]
    RingTooShort { country: String, points: usize },
    #[error("{country}: boundary ring is not closed")]
    RingNotClosed { country: String },
    #[error("{country}: boundary point {index} is not a finite coordinate")]
    NonFiniteCoordinate { country: String, index: usize },
    #[error("country {name:?} is defined more than once")]
    DuplicateName { name: String },
}

/// Failure reported by a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("view rejected: {0}")]
    ViewRejected(String),
    #[error("unknown view {0:?}")]
    UnknownView(ViewHandle),
    #[error("unknown layer {0:?}")]
    UnknownLayer(LayerHandle),
    #[error("feature {feature:?} rejected: {reason}")]
    FeatureRejected { feature: String, reason: String },
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("malformed country record: {0}")]
    MalformedRecord(#[from] RecordError),
    #[error("rendering surface error: {0}")]
    Surface(#[from] SurfaceError),
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    MalformedRecord(#[from] RecordError),
}
