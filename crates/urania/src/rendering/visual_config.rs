use crate::ephemeris::BodyId;
use crate::rendering::primitives::Color;

/// Visual styling configuration for chart elements
#[derive(Debug, Clone, PartialEq)]
pub struct VisualConfig {
    pub sign_colors: [Color; 12],
    pub planet_color: Color,
    pub secondary_planet_color: Color,
    pub house_line_color: Color,
    pub aspect_stroke_width: f32,
    pub background_color: Color,
    pub stroke_color: Color,
    pub text_color: Color,
    pub stroke_width: f32,
}

/// Element tints: fire, earth, air, water.
const CLASSIC_ELEMENTS: [Color; 4] = [
    Color::rgb(0xf4, 0xc7, 0xb8),
    Color::rgb(0xd9, 0xe8, 0xc4),
    Color::rgb(0xfb, 0xf1, 0xc6),
    Color::rgb(0xc9, 0xdd, 0xf0),
];

const DARK_ELEMENTS: [Color; 4] = [
    Color::rgb(0x5a, 0x1a, 0x1a),
    Color::rgb(0x3b, 0x2a, 0x14),
    Color::rgb(0x4a, 0x42, 0x12),
    Color::rgb(0x12, 0x2c, 0x4a),
];

fn by_element(elements: [Color; 4]) -> [Color; 12] {
    std::array::from_fn(|i| elements[i % 4])
}

impl VisualConfig {
    /// Known themes: classic, dark, light.
    pub fn for_theme(theme: &str) -> Option<Self> {
        match theme.trim().to_ascii_lowercase().as_str() {
            "classic" => Some(Self::classic()),
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    pub fn classic() -> Self {
        Self {
            sign_colors: by_element(CLASSIC_ELEMENTS),
            planet_color: Color::rgb(0x1f, 0x2a, 0x44),
            secondary_planet_color: Color::rgb(0x8b, 0x1e, 0x3f),
            house_line_color: Color::rgb(0x66, 0x66, 0x66),
            aspect_stroke_width: 1.2,
            background_color: Color::rgb(0xfd, 0xfa, 0xf3),
            stroke_color: Color::rgb(0x44, 0x44, 0x44),
            text_color: Color::rgb(0x22, 0x22, 0x22),
            stroke_width: 1.0,
        }
    }

    /// Traditional dark theme with gold strokes.
    pub fn dark() -> Self {
        Self {
            sign_colors: by_element(DARK_ELEMENTS),
            planet_color: Color::rgb(0xff, 0xd7, 0x00),
            secondary_planet_color: Color::rgb(0x87, 0xce, 0xeb),
            house_line_color: Color::rgb(0x80, 0x80, 0x80),
            aspect_stroke_width: 1.5,
            background_color: Color::BLACK,
            stroke_color: Color::rgb(0xd4, 0xaf, 0x37),
            text_color: Color::WHITE,
            stroke_width: 1.0,
        }
    }

    pub fn light() -> Self {
        Self {
            sign_colors: [Color::rgb(0xf2, 0xf2, 0xf2); 12],
            planet_color: Color::BLACK,
            secondary_planet_color: Color::rgb(0x41, 0x69, 0xe1),
            house_line_color: Color::rgb(0xaa, 0xaa, 0xaa),
            aspect_stroke_width: 1.0,
            background_color: Color::WHITE,
            stroke_color: Color::rgb(0x99, 0x99, 0x99),
            text_color: Color::BLACK,
            stroke_width: 0.8,
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Glyph configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphConfig {
    pub sign_glyphs: [&'static str; 12],
    pub glyph_size: f32,
}

impl GlyphConfig {
    pub fn planet_glyph(&self, body: BodyId) -> &'static str {
        match body {
            BodyId::Sun => "☉",
            BodyId::Moon => "☽",
            BodyId::Mercury => "☿",
            BodyId::Venus => "♀",
            BodyId::Mars => "♂",
            BodyId::Jupiter => "♃",
            BodyId::Saturn => "♄",
            BodyId::Uranus => "♅",
            BodyId::Neptune => "♆",
            BodyId::Pluto => "♇",
            BodyId::MeanNode | BodyId::TrueNode => "☊",
            BodyId::Chiron => "⚷",
            BodyId::MeanLilith => "⚸",
        }
    }
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            sign_glyphs: ["♈", "♉", "♊", "♋", "♌", "♍", "♎", "♏", "♐", "♑", "♒", "♓"],
            glyph_size: 16.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_by_name() {
        assert_eq!(VisualConfig::for_theme("Dark"), Some(VisualConfig::dark()));
        assert_eq!(VisualConfig::for_theme("classic"), Some(VisualConfig::default()));
        assert!(VisualConfig::for_theme("neon").is_none());
    }

    #[test]
    fn sign_colors_follow_elements() {
        let config = VisualConfig::classic();
        assert_eq!(config.sign_colors[0], config.sign_colors[4]);
        assert_ne!(config.sign_colors[0], config.sign_colors[1]);
    }
}
