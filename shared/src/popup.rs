//! Typed popup template for country features.
//!
//! Every row names a [`PopupField`] instead of a string placeholder, so a
//! template can only reference fields a [`CountryRecord`] actually has.

use std::borrow::Cow;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::country::CountryRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PopupField {
    Name,
    Capital,
    Population,
    PopulationDensity,
    Area,
    Currency,
    Languages,
    TypicalAnimals,
    FunFact,
}

impl PopupField {
    pub const ALL: [PopupField; 9] = [
        Self::Name,
        Self::Capital,
        Self::Population,
        Self::PopulationDensity,
        Self::Area,
        Self::Currency,
        Self::Languages,
        Self::TypicalAnimals,
        Self::FunFact,
    ];

    /// Attribute key, matching the record's serialized field name.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Capital => "capital",
            Self::Population => "population",
            Self::PopulationDensity => "populationDensity",
            Self::Area => "area",
            Self::Currency => "currency",
            Self::Languages => "languages",
            Self::TypicalAnimals => "typicalAnimals",
            Self::FunFact => "funFact",
        }
    }

    pub fn placeholder(self) -> String {
        format!("{{{}}}", self.key())
    }

    /// List-valued fields are joined with `", "` in source order.
    pub fn resolve(self, record: &CountryRecord) -> Cow<'_, str> {
        match self {
            Self::Name => Cow::Borrowed(record.name.as_str()),
            Self::Capital => Cow::Borrowed(record.capital.as_str()),
            Self::Population => Cow::Borrowed(record.population.as_str()),
            Self::PopulationDensity => Cow::Borrowed(record.population_density.as_str()),
            Self::Area => Cow::Borrowed(record.area.as_str()),
            Self::Currency => Cow::Borrowed(record.currency.as_str()),
            Self::Languages => Cow::Owned(record.languages_joined()),
            Self::TypicalAnimals => Cow::Owned(record.typical_animals_joined()),
            Self::FunFact => Cow::Borrowed(record.fun_fact.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupTemplate {
    pub title: PopupField,
    pub rows: &'static [(&'static str, PopupField)],
}

pub const COUNTRY_POPUP: PopupTemplate = PopupTemplate {
    title: PopupField::Name,
    rows: &[
        ("Capital", PopupField::Capital),
        ("Población", PopupField::Population),
        ("Densidad poblacional", PopupField::PopulationDensity),
        ("Superficie", PopupField::Area),
        ("Moneda", PopupField::Currency),
        ("Idiomas", PopupField::Languages),
        ("Animales típicos", PopupField::TypicalAnimals),
        ("Dato curioso", PopupField::FunFact),
    ],
};

impl PopupTemplate {
    pub fn render(&self, record: &CountryRecord) -> PopupContent {
        PopupContent {
            title: self.title.resolve(record).into_owned(),
            rows: self
                .rows
                .iter()
                .map(|(label, field)| PopupRow {
                    label: (*label).to_owned(),
                    value: field.resolve(record).into_owned(),
                })
                .collect(),
        }
    }

    /// Unresolved form, one `Label: {field}` line per row.
    pub fn source(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title.placeholder());
        for (label, field) in self.rows {
            let _ = writeln!(out, "{label}: {}", field.placeholder());
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupRow {
    pub label: String,
    pub value: String,
}

/// Resolved popup, ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupContent {
    pub title: String,
    pub rows: Vec<PopupRow>,
}

impl PopupContent {
    pub fn value_of(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let _ = writeln!(out, "{}: {}", row.label, row.value);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let _ = write!(
                out,
                "<p><strong>{}:</strong> {}</p>",
                escape_html(&row.label),
                escape_html(&row.value)
            );
        }
        out
    }
}

pub fn escape_html(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}
