use crate::aspects::types::Aspect;
use crate::ephemeris::{BodyId, EphemerisChart, StructuredPlacement};

/// Aspect definitions in order of frequency (most common first):
/// name, exact angle, orb, color tag.
const ASPECT_TABLE: &[(&str, f64, f64, &str)] = &[
    ("conjunction", 0.0, 10.0, "#5757e2"),
    ("opposition", 180.0, 10.0, "#510060"),
    ("trine", 120.0, 8.0, "#36d100"),
    ("square", 90.0, 5.0, "#dc0000"),
    ("sextile", 60.0, 6.0, "#d59e28"),
    ("quincunx", 150.0, 2.0, "#a4a4a4"),
];

/// Aspect calculator over engine placements.
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Aspects between all body pairs of one chart
    pub fn within_chart(&self, chart: &EphemerisChart) -> Vec<Aspect> {
        let bodies: Vec<(BodyId, &StructuredPlacement)> = chart.structured_bodies().collect();
        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (id1, p1) = bodies[i];
                let (id2, p2) = bodies[j];
                if let Some(aspect) = self.calculate_aspect(id1.name(), p1.abs_pos, id2.name(), p2.abs_pos) {
                    aspects.push(aspect);
                }
            }
        }
        aspects
    }

    /// Aspects from every body of `first` to every body of `second`. Same-body
    /// pairs are kept: Sun/Sun contacts matter between two people.
    pub fn between_charts(&self, first: &EphemerisChart, second: &EphemerisChart) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for (id1, p1) in first.structured_bodies() {
            for (id2, p2) in second.structured_bodies() {
                if let Some(aspect) = self.calculate_aspect(id1.name(), p1.abs_pos, id2.name(), p2.abs_pos) {
                    aspects.push(aspect);
                }
            }
        }
        aspects
    }

    /// Aspect between two longitudes, if any is within orb
    pub fn calculate_aspect(&self, name1: &str, lon1: f64, name2: &str, lon2: f64) -> Option<Aspect> {
        // Calculate angle difference (normalized to 0-180)
        let raw_diff = (lon1 - lon2).abs() % 360.0;
        let angle_diff = if raw_diff > 180.0 {
            360.0 - raw_diff
        } else {
            raw_diff
        };

        for (name, angle, orb, color) in ASPECT_TABLE {
            let deviation = (angle_diff - angle).abs();
            if deviation <= *orb {
                return Some(Aspect {
                    p1_name: name1.to_string(),
                    p2_name: name2.to_string(),
                    aspect: name.to_string(),
                    aspect_degrees: *angle,
                    orbit: *orb,
                    diff: deviation,
                    color: color.to_string(),
                });
            }
        }

        None
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}
