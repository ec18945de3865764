use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Point at `radius` from `center`. Angles are in degrees, 0 = top, clockwise.
    pub fn polar(center: Point, angle_deg: f32, radius: f32) -> Point {
        let rad = angle_deg.to_radians();
        Point {
            x: center.x + radius * rad.sin(),
            y: center.y - radius * rad.cos(),
        }
    }
}

/// Color in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Create color from hex string (e.g., "#FF0000" or "#FF0000FF")
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => None,
        }
    }

    /// Convert to CSS string
    pub fn to_css_string(&self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {})",
                self.r,
                self.g,
                self.b,
                self.a as f32 / 255.0
            )
        }
    }
}

/// Stroke style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dash_array: Option<Vec<f32>>,
}

impl Stroke {
    pub fn solid(color: Color, width: f32) -> Self {
        Stroke {
            color,
            width,
            dash_array: None,
        }
    }

    fn attrs(&self) -> String {
        let mut out = format!(
            r#" stroke="{}" stroke-width="{:.2}""#,
            self.color.to_css_string(),
            self.width
        );
        if let Some(dashes) = &self.dash_array {
            let pattern: Vec<String> = dashes.iter().map(|d| format!("{d:.1}")).collect();
            let _ = write!(out, r#" stroke-dasharray="{}""#, pattern.join(" "));
        }
        out
    }
}

/// Text anchor position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_svg(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Shape primitives for chart rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Circle {
        center: Point,
        radius: f32,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Text {
        position: Point,
        content: String,
        size: f32,
        color: Color,
        anchor: TextAnchor,
    },
    PlanetGlyph {
        center: Point,
        glyph: String,
        size: f32,
        color: Color,
        retrograde: bool,
    },
    /// Ring segment from `start_angle` clockwise over `sweep` degrees.
    SignSegment {
        center: Point,
        sign_index: u8,
        start_angle: f32,
        sweep: f32,
        radius_inner: f32,
        radius_outer: f32,
        fill: Color,
        stroke: Option<Stroke>,
    },
}

fn fill_attr(fill: Option<Color>) -> String {
    match fill {
        Some(color) => format!(r#" fill="{}""#, color.to_css_string()),
        None => r#" fill="none""#.to_string(),
    }
}

/// Escape text for use in SVG content and attributes.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

impl Shape {
    /// SVG element for this shape.
    pub fn to_svg(&self) -> String {
        match self {
            Shape::Circle { center, radius, fill, stroke } => format!(
                r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}"{}{}/>"#,
                center.x,
                center.y,
                radius,
                fill_attr(*fill),
                stroke.as_ref().map(Stroke::attrs).unwrap_or_default()
            ),
            Shape::Line { from, to, stroke } => format!(
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}"{}/>"#,
                from.x,
                from.y,
                to.x,
                to.y,
                stroke.attrs()
            ),
            Shape::Text { position, content, size, color, anchor } => format!(
                r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" fill="{}" text-anchor="{}" dominant-baseline="middle">{}</text>"#,
                position.x,
                position.y,
                size,
                color.to_css_string(),
                anchor.as_svg(),
                escape_xml(content)
            ),
            Shape::PlanetGlyph { center, glyph, size, color, retrograde } => {
                let mut out = format!(
                    r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" fill="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                    center.x,
                    center.y,
                    size,
                    color.to_css_string(),
                    escape_xml(glyph)
                );
                if *retrograde {
                    let _ = write!(
                        out,
                        r#"<text x="{:.2}" y="{:.2}" font-size="{:.1}" fill="{}">℞</text>"#,
                        center.x + size * 0.6,
                        center.y + size * 0.6,
                        size * 0.5,
                        color.to_css_string()
                    );
                }
                out
            }
            Shape::SignSegment {
                center,
                sign_index,
                start_angle,
                sweep,
                radius_inner,
                radius_outer,
                fill,
                stroke,
            } => {
                let end_angle = start_angle + sweep;
                let large = if *sweep > 180.0 { 1 } else { 0 };
                let o1 = Point::polar(*center, *start_angle, *radius_outer);
                let o2 = Point::polar(*center, end_angle, *radius_outer);
                let i2 = Point::polar(*center, end_angle, *radius_inner);
                let i1 = Point::polar(*center, *start_angle, *radius_inner);
                format!(
                    r#"<path data-sign="{}" d="M {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 0 {:.2} {:.2} Z"{}{}/>"#,
                    sign_index,
                    o1.x,
                    o1.y,
                    radius_outer,
                    radius_outer,
                    large,
                    o2.x,
                    o2.y,
                    i2.x,
                    i2.y,
                    radius_inner,
                    radius_inner,
                    large,
                    i1.x,
                    i1.y,
                    fill_attr(Some(*fill)),
                    stroke.as_ref().map(Stroke::attrs).unwrap_or_default()
                )
            }
        }
    }
}
