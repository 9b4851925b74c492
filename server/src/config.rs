use std::path::PathBuf;

use atlas_shared::surface::{DEFAULT_BASEMAP, DEFAULT_CENTER, DEFAULT_CONTAINER, DEFAULT_ZOOM};
use atlas_shared::{Position, ViewConfig};

pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const MAX_ZOOM: u8 = 24;
pub const API_CACHE_CONTROL: &str = "public, max-age=300";
pub const PAGE_CACHE_CONTROL: &str = "no-cache";

pub fn server_port() -> u16 {
    std::env::var("ATLAS_PORT")
        .ok()
        .and_then(|value| value.trim().parse::<u16>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_SERVER_PORT)
}

/// Optional JSON dataset replacing the built-in countries.
pub fn countries_path() -> Option<PathBuf> {
    std::env::var("ATLAS_COUNTRIES_PATH")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn basemap() -> String {
    std::env::var("ATLAS_BASEMAP")
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASEMAP.to_owned())
}

/// `ATLAS_CENTER=lon,lat`; out-of-range or malformed values fall back.
pub fn center() -> Position {
    std::env::var("ATLAS_CENTER")
        .ok()
        .and_then(|value| parse_center(&value))
        .unwrap_or(DEFAULT_CENTER)
}

pub fn zoom() -> u8 {
    std::env::var("ATLAS_ZOOM")
        .ok()
        .and_then(|value| value.trim().parse::<u8>().ok())
        .filter(|value| *value <= MAX_ZOOM)
        .unwrap_or(DEFAULT_ZOOM)
}

pub fn view_config() -> ViewConfig {
    ViewConfig {
        container: DEFAULT_CONTAINER.to_owned(),
        basemap: basemap(),
        center: center(),
        zoom: zoom(),
    }
}

fn parse_center(raw: &str) -> Option<Position> {
    let (lon, lat) = raw.split_once(',')?;
    let lon = lon.trim().parse::<f64>().ok()?;
    let lat = lat.trim().parse::<f64>().ok()?;
    ((-180.0..=180.0).contains(&lon) && (-90.0..=90.0).contains(&lat)).then_some([lon, lat])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_env() {
        temp_env::with_vars_unset(
            [
                "ATLAS_PORT",
                "ATLAS_COUNTRIES_PATH",
                "ATLAS_BASEMAP",
                "ATLAS_CENTER",
                "ATLAS_ZOOM",
            ],
            || {
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(countries_path(), None);
                assert_eq!(view_config(), ViewConfig::default());
            },
        );
    }

    #[test]
    fn env_overrides_view() {
        temp_env::with_vars(
            [
                ("ATLAS_BASEMAP", Some("streets-vector")),
                ("ATLAS_CENTER", Some(" -60.5, -30 ")),
                ("ATLAS_ZOOM", Some("4")),
            ],
            || {
                let config = view_config();
                assert_eq!(config.basemap, "streets-vector");
                assert_eq!(config.center, [-60.5, -30.0]);
                assert_eq!(config.zoom, 4);
                assert_eq!(config.container, DEFAULT_CONTAINER);
            },
        );
    }

    #[test]
    fn invalid_values_fall_back() {
        temp_env::with_vars(
            [
                ("ATLAS_PORT", Some("0")),
                ("ATLAS_CENTER", Some("200,10")),
                ("ATLAS_ZOOM", Some("99")),
                ("ATLAS_BASEMAP", Some("   ")),
                ("ATLAS_COUNTRIES_PATH", Some("")),
            ],
            || {
                assert_eq!(server_port(), DEFAULT_SERVER_PORT);
                assert_eq!(center(), DEFAULT_CENTER);
                assert_eq!(zoom(), DEFAULT_ZOOM);
                assert_eq!(basemap(), DEFAULT_BASEMAP);
                assert_eq!(countries_path(), None);
            },
        );
    }

    #[test]
    fn parse_center_requires_two_numbers() {
        assert_eq!(parse_center("10,20"), Some([10.0, 20.0]));
        assert_eq!(parse_center("10"), None);
        assert_eq!(parse_center("a,b"), None);
        assert_eq!(parse_center("0,-91"), None);
    }
}
