use serde::{Deserialize, Serialize};

/// 8-bit RGBA color. Alpha 0 is fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const fn is_transparent(self) -> bool {
        self.3 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: Rgba,
    pub width: f32,
}

/// Simple polygon fill symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    pub color: Rgba,
    pub outline: Option<Outline>,
}

/// Invisible fill with no outline. Country polygons only act as popup hit
/// areas over the basemap; they must stay transparent.
pub const POPUP_HIT_AREA: FillStyle = FillStyle {
    color: Rgba(51, 102, 255, 0),
    outline: None,
};

impl FillStyle {
    pub const fn is_invisible(&self) -> bool {
        self.color.is_transparent() && self.outline.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_hit_area_is_invisible() {
        assert!(POPUP_HIT_AREA.is_invisible());
        assert_eq!(POPUP_HIT_AREA.color, Rgba(51, 102, 255, 0));
    }

    #[test]
    fn outlined_style_is_visible() {
        let style = FillStyle {
            color: Rgba(0, 0, 0, 0),
            outline: Some(Outline {
                color: Rgba(0, 0, 0, 255),
                width: 1.0,
            }),
        };
        assert!(!style.is_invisible());
    }
}
