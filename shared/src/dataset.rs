use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::country::{CountryRecord, Ring, validate_all};
use crate::error::DatasetError;

/// The three countries shipped with the map.
pub fn builtin_countries() -> Vec<CountryRecord> {
    vec![
        country(
            "Chile",
            "Santiago",
            "19 millones",
            "25 per/km²",
            "756,096 km²",
            "Peso chileno (CLP)",
            &["Español"],
            &["Cóndor andino", "Puma", "Zorro culpeo"],
            "El cóndor andino es una de las aves voladoras más grandes del mundo, con una envergadura de hasta 3.3 metros.",
            &[[-75.0, -55.0], [-70.0, -55.0], [-70.0, -17.0], [-75.0, -17.0], [-75.0, -55.0]],
        ),
        country(
            "Argentina",
            "Buenos Aires",
            "45 millones",
            "16 per/km²",
            "2,780,400 km²",
            "Peso argentino (ARS)",
            &["Español"],
            &["Guanaco", "Ñandú", "Yaguareté"],
            "El guanaco es una especie de camélido que puede sobrevivir en las condiciones extremas de la Puna argentina.",
            &[[-73.0, -55.0], [-53.0, -55.0], [-53.0, -22.0], [-73.0, -22.0], [-73.0, -55.0]],
        ),
        country(
            "Brasil",
            "Brasilia",
            "214 millones",
            "25 per/km²",
            "8,515,767 km²",
            "Real brasileño (BRL)",
            &["Portugués"],
            &["Jaguar", "Capibara", "Tucán"],
            "El jaguar es el felino más grande de América y uno de los pocos grandes felinos que disfruta nadar.",
            &[[-73.0, -33.0], [-34.0, -33.0], [-34.0, 5.0], [-73.0, 5.0], [-73.0, -33.0]],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn country(
    name: &str,
    capital: &str,
    population: &str,
    population_density: &str,
    area: &str,
    currency: &str,
    languages: &[&str],
    typical_animals: &[&str],
    fun_fact: &str,
    boundary: &[[f64; 2]],
) -> CountryRecord {
    CountryRecord {
        name: name.to_owned(),
        capital: capital.to_owned(),
        population: population.to_owned(),
        population_density: population_density.to_owned(),
        area: area.to_owned(),
        currency: currency.to_owned(),
        languages: languages.iter().map(|s| (*s).to_owned()).collect(),
        typical_animals: typical_animals.iter().map(|s| (*s).to_owned()).collect(),
        fun_fact: fun_fact.to_owned(),
        boundary: Ring::new(boundary.to_vec()),
    }
}

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(alias = "paises")]
    countries: Vec<CountryRecord>,
}

/// Validated, ordered set of countries with lookup by name.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryCatalog {
    records: Vec<CountryRecord>,
}

impl CountryCatalog {
    pub fn new(records: Vec<CountryRecord>) -> Result<Self, DatasetError> {
        validate_all(&records)?;
        Ok(Self { records })
    }

    pub fn builtin() -> Self {
        Self {
            records: builtin_countries(),
        }
    }

    /// Parses `{"countries": [...]}` (or the original `{"paises": [...]}`).
    pub fn from_json_str(text: &str) -> Result<Self, DatasetError> {
        let file: DatasetFile = serde_json::from_str(text)?;
        Self::new(file.countries)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        info!(path = %path.display(), countries = catalog.len(), "loaded country dataset");
        Ok(catalog)
    }

    pub fn all(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|record| record.name.as_str())
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn get(&self, name: &str) -> Option<&CountryRecord> {
        let wanted = name.trim().to_lowercase();
        self.records
            .iter()
            .find(|record| record.name.trim().to_lowercase() == wanted)
    }
}
