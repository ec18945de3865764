use serde::{Deserialize, Serialize};

/// Angular relationship between two placements, possibly from two charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub p1_name: String,
    pub p2_name: String,
    /// Aspect type: "conjunction", "trine", etc.
    pub aspect: String,
    /// Exact angle for this aspect type (0, 60, 90, 120, 180, ...)
    pub aspect_degrees: f64,
    /// Allowed deviation for this aspect type
    pub orbit: f64,
    /// Deviation of the actual separation from `aspect_degrees`
    pub diff: f64,
    /// Display color tag
    pub color: String,
}

impl Aspect {
    pub fn new(p1_name: impl Into<String>, p2_name: impl Into<String>, aspect: impl Into<String>) -> Self {
        Self {
            p1_name: p1_name.into(),
            p2_name: p2_name.into(),
            aspect: aspect.into(),
            aspect_degrees: 0.0,
            orbit: 0.0,
            diff: 0.0,
            color: String::new(),
        }
    }
}
