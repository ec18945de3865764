use crate::aspects::Aspect;
use crate::ephemeris::EphemerisChart;
use crate::rendering::primitives::{escape_xml, Color, Point, Shape, Stroke, TextAnchor};
use crate::rendering::renderer::{ChartKind, ChartRenderer, RenderError, RenderRequest};
use crate::rendering::visual_config::{GlyphConfig, VisualConfig};
use std::collections::HashMap;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Drawable chart: canvas size plus shapes in paint order.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub background_color: Color,
    pub shapes: Vec<Shape>,
}

impl ChartSpec {
    pub fn to_svg_document(&self) -> String {
        let mut doc = String::new();
        let _ = writeln!(doc, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        let _ = writeln!(doc, "<title>{}</title>", escape_xml(&self.title));
        let _ = writeln!(
            doc,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            self.background_color.to_css_string()
        );
        for shape in &self.shapes {
            doc.push_str(&shape.to_svg());
            doc.push('\n');
        }
        doc.push_str("</svg>\n");
        doc
    }
}

/// Fractions of the wheel radius.
const ZODIAC_OUTER: f32 = 1.0;
const ZODIAC_INNER: f32 = 0.86;
const SECONDARY_RING: f32 = 0.76;
const PRIMARY_RING: f32 = 0.62;
const ASPECT_RADIUS: f32 = 0.48;

/// ChartSpec generator - converts engine charts to a drawable wheel with the
/// ascendant on the left.
pub struct ChartSpecGenerator {
    visual_config: VisualConfig,
    glyph_config: GlyphConfig,
}

impl ChartSpecGenerator {
    pub fn with_configs(visual_config: VisualConfig, glyph_config: GlyphConfig) -> Self {
        Self {
            visual_config,
            glyph_config,
        }
    }

    pub fn generate(&self, request: &RenderRequest<'_>, size: f32) -> ChartSpec {
        let header = 40.0;
        let center = Point {
            x: size / 2.0,
            y: header + size / 2.0,
        };
        let max_radius = size / 2.0 - 20.0;
        let rotation = -(request.primary.first_house().map(|h| h.abs_pos).unwrap_or(0.0) + 180.0);

        let mut shapes = Vec::new();
        shapes.extend(self.zodiac_ring(center, max_radius, rotation));
        shapes.extend(self.house_lines(request.primary, center, max_radius, rotation));

        let primary_ring = if request.secondary.is_some() { PRIMARY_RING } else { (PRIMARY_RING + SECONDARY_RING) / 2.0 };
        let primary = self.planet_glyphs(
            request.primary,
            center,
            max_radius * primary_ring,
            rotation,
            self.visual_config.planet_color,
        );
        let secondary = request
            .secondary
            .map(|chart| {
                self.planet_glyphs(
                    chart,
                    center,
                    max_radius * SECONDARY_RING,
                    rotation,
                    self.visual_config.secondary_planet_color,
                )
            })
            .unwrap_or_default();

        shapes.extend(self.aspect_lines(request, center, max_radius * ASPECT_RADIUS, rotation));
        shapes.extend(primary);
        shapes.extend(secondary);

        let title = request.options.language.chart_title(request.kind, &request.subject);
        shapes.push(Shape::Text {
            position: Point {
                x: size / 2.0,
                y: header / 2.0,
            },
            content: title.clone(),
            size: 18.0,
            color: self.visual_config.text_color,
            anchor: TextAnchor::Middle,
        });

        ChartSpec {
            width: size,
            height: size + header,
            title,
            background_color: self.visual_config.background_color,
            shapes,
        }
    }

    fn stroke(&self) -> Stroke {
        Stroke::solid(self.visual_config.stroke_color, self.visual_config.stroke_width)
    }

    fn zodiac_ring(&self, center: Point, max_radius: f32, rotation: f64) -> Vec<Shape> {
        let mut shapes = Vec::with_capacity(26);
        let inner = max_radius * ZODIAC_INNER;
        let outer = max_radius * ZODIAC_OUTER;
        for index in 0..12u8 {
            let start_lon = index as f64 * 30.0;
            shapes.push(Shape::SignSegment {
                center,
                sign_index: index,
                start_angle: astro_to_svg_angle(start_lon + 30.0, rotation),
                sweep: 30.0,
                radius_inner: inner,
                radius_outer: outer,
                fill: self.visual_config.sign_colors[index as usize],
                stroke: Some(self.stroke()),
            });
            shapes.push(Shape::Text {
                position: Point::polar(center, astro_to_svg_angle(start_lon + 15.0, rotation), (inner + outer) / 2.0),
                content: self.glyph_config.sign_glyphs[index as usize].to_string(),
                size: self.glyph_config.glyph_size,
                color: self.visual_config.text_color,
                anchor: TextAnchor::Middle,
            });
        }
        shapes.push(Shape::Circle {
            center,
            radius: max_radius * ASPECT_RADIUS,
            fill: None,
            stroke: Some(self.stroke()),
        });
        shapes
    }

    fn house_lines(&self, chart: &EphemerisChart, center: Point, max_radius: f32, rotation: f64) -> Vec<Shape> {
        chart
            .houses
            .iter()
            .enumerate()
            .map(|(i, cusp)| {
                let angle = astro_to_svg_angle(cusp.abs_pos, rotation);
                // Angular houses (1, 4, 7, 10) drawn heavier
                let width = if i % 3 == 0 { 2.0 } else { 0.8 };
                Shape::Line {
                    from: Point::polar(center, angle, max_radius * ASPECT_RADIUS),
                    to: Point::polar(center, angle, max_radius * ZODIAC_INNER),
                    stroke: Stroke::solid(self.visual_config.house_line_color, width),
                }
            })
            .collect()
    }

    fn planet_glyphs(&self, chart: &EphemerisChart, center: Point, radius: f32, rotation: f64, color: Color) -> Vec<Shape> {
        chart
            .structured_bodies()
            .map(|(body, placement)| Shape::PlanetGlyph {
                center: Point::polar(center, astro_to_svg_angle(placement.abs_pos, rotation), radius),
                glyph: self.glyph_config.planet_glyph(body).to_string(),
                size: self.glyph_config.glyph_size,
                color,
                retrograde: placement.retrograde,
            })
            .collect()
    }

    /// Aspect chords inside the inner circle. First names resolve against the
    /// primary chart, second names against the secondary one when present.
    fn aspect_lines(&self, request: &RenderRequest<'_>, center: Point, radius: f32, rotation: f64) -> Vec<Shape> {
        let first = longitudes(request.primary);
        let second = request.secondary.map(longitudes).unwrap_or_else(|| first.clone());

        request
            .aspects
            .iter()
            .filter_map(|aspect: &Aspect| {
                let from = first.get(aspect.p1_name.as_str())?;
                let to = second.get(aspect.p2_name.as_str())?;
                let color = Color::from_hex(&aspect.color).unwrap_or(self.visual_config.stroke_color);
                Some(Shape::Line {
                    from: Point::polar(center, astro_to_svg_angle(*from, rotation), radius),
                    to: Point::polar(center, astro_to_svg_angle(*to, rotation), radius),
                    stroke: Stroke::solid(color, self.visual_config.aspect_stroke_width),
                })
            })
            .collect()
    }
}

impl Default for ChartSpecGenerator {
    fn default() -> Self {
        Self::with_configs(VisualConfig::default(), GlyphConfig::default())
    }
}

fn longitudes(chart: &EphemerisChart) -> HashMap<&'static str, f64> {
    chart
        .structured_bodies()
        .map(|(body, placement)| (body.name(), placement.abs_pos))
        .collect()
}

/// Convert ecliptic longitude to SVG angle (0 = top, clockwise). The zodiac runs
/// counter-clockwise.
fn astro_to_svg_angle(astro_angle: f64, rotation_offset: f64) -> f32 {
    let angle = (90.0 - (astro_angle + rotation_offset)).rem_euclid(360.0);
    angle as f32
}

/// Renderer writing standalone SVG documents.
pub struct SvgChartRenderer {
    size: f32,
    glyph_config: GlyphConfig,
}

impl SvgChartRenderer {
    pub fn new() -> Self {
        Self {
            size: 600.0,
            glyph_config: GlyphConfig::default(),
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn chart_spec(&self, request: &RenderRequest<'_>) -> Result<ChartSpec, RenderError> {
        if request.primary.structured_bodies().next().is_none() {
            return Err(RenderError::EmptyChart {
                subject: request.subject.clone(),
            });
        }
        if matches!(request.kind, ChartKind::Synastry | ChartKind::Transit) && request.secondary.is_none() {
            return Err(RenderError::MissingSecondary { kind: request.kind });
        }

        let visual = VisualConfig::for_theme(&request.options.theme).unwrap_or_else(|| {
            log::warn!("Unknown chart theme {:?}, using classic", request.options.theme);
            VisualConfig::classic()
        });
        let generator = ChartSpecGenerator::with_configs(visual, self.glyph_config.clone());
        Ok(generator.generate(request, self.size))
    }
}

impl Default for SvgChartRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, request: &RenderRequest<'_>, output_dir: &Path) -> Result<(), RenderError> {
        let spec = self.chart_spec(request)?;
        let path = output_dir.join(request.file_name());
        fs::write(&path, spec.to_svg_document())?;
        log::debug!("Wrote {} chart to {}", request.kind, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::zodiac;
    use crate::ephemeris::{BodyId, PlacementSource};
    use crate::placements::Language;
    use crate::profile::ZodiacType;
    use crate::rendering::renderer::RenderOptions;
    use std::collections::BTreeMap;

    fn chart(name: &str, sun: f64) -> EphemerisChart {
        let cusps: Vec<f64> = (0..12).map(|i| i as f64 * 30.0).collect();
        let mut bodies = BTreeMap::new();
        bodies.insert(BodyId::Sun, PlacementSource::Structured(zodiac::placement_from_longitude(sun, 1.0, &cusps)));
        bodies.insert(BodyId::Moon, PlacementSource::Structured(zodiac::placement_from_longitude(sun + 120.0, -1.0, &cusps)));
        EphemerisChart {
            name: name.into(),
            lng: 0.0,
            lat: 0.0,
            tz_str: "UTC".into(),
            zodiac_type: ZodiacType::Tropical,
            bodies,
            houses: cusps.iter().map(|c| zodiac::cusp_from_longitude(*c)).collect(),
        }
    }

    #[test]
    fn ascendant_sits_on_the_left() {
        assert!((astro_to_svg_angle(0.0, -180.0) - 270.0).abs() < 1e-4);
        assert!((astro_to_svg_angle(90.0, -180.0) - 180.0).abs() < 1e-4);
    }

    #[test]
    fn renders_wheel_with_title_and_aspects() {
        let natal = chart("A & B", 10.0);
        let aspects = vec![Aspect {
            color: "#36d100".into(),
            ..Aspect::new("Sun", "Moon", "trine")
        }];
        let request = RenderRequest {
            kind: ChartKind::Natal,
            subject: natal.name.clone(),
            primary: &natal,
            secondary: None,
            aspects: &aspects,
            options: RenderOptions {
                theme: "dark".into(),
                language: Language::EN,
            },
        };
        let doc = SvgChartRenderer::new().chart_spec(&request).unwrap().to_svg_document();
        assert!(doc.starts_with("<?xml"));
        assert!(doc.contains("Natal Chart - A &amp; B"));
        assert!(doc.contains("☉"));
        assert!(doc.contains("℞"));
        assert!(doc.contains("rgb(54, 209, 0)"));
        assert!(doc.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn synastry_needs_two_charts() {
        let natal = chart("A", 10.0);
        let request = RenderRequest {
            kind: ChartKind::Synastry,
            subject: "A".into(),
            primary: &natal,
            secondary: None,
            aspects: &[],
            options: RenderOptions::default(),
        };
        assert!(matches!(
            SvgChartRenderer::new().chart_spec(&request),
            Err(RenderError::MissingSecondary { .. })
        ));
    }

    #[test]
    fn writes_file_named_after_subject() {
        let dir = tempfile::tempdir().unwrap();
        let natal = chart("Jean", 200.0);
        let request = RenderRequest {
            kind: ChartKind::Natal,
            subject: "Jean".into(),
            primary: &natal,
            secondary: None,
            aspects: &[],
            options: RenderOptions::default(),
        };
        SvgChartRenderer::new().render(&request, dir.path()).unwrap();
        assert!(dir.path().join("Jean - Natal Chart.svg").exists());
    }
}
