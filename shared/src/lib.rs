pub mod country;
pub mod dataset;
pub mod error;
pub mod export;
pub mod feature;
pub mod popup;
pub mod scene;
pub mod style;
pub mod surface;

pub use country::{CountryRecord, Position, Ring};
pub use dataset::{CountryCatalog, builtin_countries};
pub use error::{DatasetError, InitError, RecordError, SurfaceError};
pub use feature::{MapFeature, build_feature};
pub use popup::{COUNTRY_POPUP, PopupContent, PopupField};
pub use scene::{Scene, SceneSurface};
pub use style::{FillStyle, POPUP_HIT_AREA, Rgba};
pub use surface::{RenderingSurface, ViewConfig, ViewHandle, initialize};
