use serde::{Deserialize, Serialize, Serializer};

use crate::error::RecordError;

/// `[longitude, latitude]` in degrees.
pub type Position = [f64; 2];

/// Smallest closed ring: a triangle plus the repeated start point.
pub const MIN_RING_POINTS: usize = 4;

/// Closed polygon boundary. The first and last positions are identical.
///
/// Serializes as a bare position array. Also reads the browser toolkit's
/// polygon shape, `{"type": "polygon", "rings": [...]}`, with either a single
/// ring or a one-element list of rings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RingRepr")]
pub struct Ring(pub Vec<Position>);

impl Serialize for Ring {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RingRepr {
    Points(Vec<Position>),
    Polygon { rings: PolygonRings },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PolygonRings {
    Single(Vec<Position>),
    Nested(Vec<Vec<Position>>),
}

impl TryFrom<RingRepr> for Ring {
    type Error = String;

    fn try_from(repr: RingRepr) -> Result<Self, Self::Error> {
        match repr {
            RingRepr::Points(points)
            | RingRepr::Polygon {
                rings: PolygonRings::Single(points),
            } => Ok(Self(points)),
            RingRepr::Polygon {
                rings: PolygonRings::Nested(mut rings),
            } => match rings.len() {
                1 => Ok(Self(rings.remove(0))),
                n => Err(format!("expected exactly one polygon ring, found {n}")),
            },
        }
    }
}

impl Ring {
    pub fn new(points: Vec<Position>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Position] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    fn validate(&self, country: &str) -> Result<(), RecordError> {
        if self.0.len() < MIN_RING_POINTS {
            return Err(RecordError::RingTooShort {
                country: country.to_owned(),
                points: self.0.len(),
            });
        }
        if let Some(index) = self
            .0
            .iter()
            .position(|[lon, lat]| !lon.is_finite() || !lat.is_finite())
        {
            return Err(RecordError::NonFiniteCoordinate {
                country: country.to_owned(),
                index,
            });
        }
        if !self.is_closed() {
            return Err(RecordError::RingNotClosed {
                country: country.to_owned(),
            });
        }
        Ok(())
    }
}

/// Static country metadata plus its map boundary.
///
/// Numeric-looking fields (`population`, `area`, ...) are display strings and
/// are never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    #[serde(alias = "nombre")]
    pub name: String,
    pub capital: String,
    #[serde(alias = "poblacion")]
    pub population: String,
    #[serde(alias = "densidad_poblacional")]
    pub population_density: String,
    #[serde(alias = "superficie")]
    pub area: String,
    #[serde(alias = "moneda")]
    pub currency: String,
    #[serde(alias = "idiomas")]
    pub languages: Vec<String>,
    #[serde(alias = "animales_tipicos")]
    pub typical_animals: Vec<String>,
    #[serde(alias = "dato_curioso")]
    pub fun_fact: String,
    #[serde(alias = "geometry")]
    pub boundary: Ring,
}

impl CountryRecord {
    /// Checks every field a feature needs before anything is drawn.
    pub fn validate(&self) -> Result<(), RecordError> {
        let label = if self.name.trim().is_empty() {
            "<unnamed>"
        } else {
            self.name.as_str()
        };

        let text_fields = [
            ("name", &self.name),
            ("capital", &self.capital),
            ("population", &self.population),
            ("populationDensity", &self.population_density),
            ("area", &self.area),
            ("currency", &self.currency),
            ("funFact", &self.fun_fact),
        ];
        for (field, value) in text_fields {
            if value.trim().is_empty() {
                return Err(RecordError::BlankField {
                    country: label.to_owned(),
                    field,
                });
            }
        }

        let list_fields = [
            ("languages", &self.languages),
            ("typicalAnimals", &self.typical_animals),
        ];
        for (field, values) in list_fields {
            if values.is_empty() {
                return Err(RecordError::EmptyList {
                    country: label.to_owned(),
                    field,
                });
            }
            if values.iter().any(|value| value.trim().is_empty()) {
                return Err(RecordError::BlankField {
                    country: label.to_owned(),
                    field,
                });
            }
        }

        self.boundary.validate(label)
    }

    pub fn languages_joined(&self) -> String {
        self.languages.join(", ")
    }

    pub fn typical_animals_joined(&self) -> String {
        self.typical_animals.join(", ")
    }
}

/// Validates a whole dataset up front; the first failure aborts.
pub fn validate_all(records: &[CountryRecord]) -> Result<(), RecordError> {
    let mut seen: Vec<String> = Vec::with_capacity(records.len());
    for record in records {
        record.validate()?;
        let key = record.name.trim().to_lowercase();
        if seen.contains(&key) {
            return Err(RecordError::DuplicateName {
                name: record.name.clone(),
            });
        }
        seen.push(key);
    }
    Ok(())
}
