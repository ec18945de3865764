//! Longitude to sign/house arithmetic shared by the adapter and its composite path.

use crate::ephemeris::types::{HouseCusp, StructuredPlacement, HOUSE_CODES};

pub const SIGN_CODES: [&str; 12] = [
    "Ari", "Tau", "Gem", "Can", "Leo", "Vir", "Lib", "Sco", "Sag", "Cap", "Aqu", "Pis",
];

const ELEMENTS: [&str; 4] = ["Fire", "Earth", "Air", "Water"];
const QUALITIES: [&str; 3] = ["Cardinal", "Fixed", "Mutable"];

/// Wrap into [0, 360).
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = lon % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

pub fn sign_index(lon: f64) -> usize {
    ((normalize_longitude(lon) / 30.0) as usize) % 12
}

/// Midpoint on the shorter arc between two longitudes.
pub fn midpoint(a: f64, b: f64) -> f64 {
    let a = normalize_longitude(a);
    let b = normalize_longitude(b);
    let mut diff = b - a;
    if diff > 180.0 {
        diff -= 360.0;
    } else if diff < -180.0 {
        diff += 360.0;
    }
    normalize_longitude(a + diff / 2.0)
}

/// Index (0-11) of the house whose span contains `lon`. Cusps are in house order
/// and may wrap through 0°.
pub fn house_index(lon: f64, cusps: &[f64]) -> Option<usize> {
    if cusps.len() != 12 {
        return None;
    }
    let lon = normalize_longitude(lon);
    for i in 0..12 {
        let start = normalize_longitude(cusps[i]);
        let end = normalize_longitude(cusps[(i + 1) % 12]);
        let inside = if start <= end {
            lon >= start && lon < end
        } else {
            lon >= start || lon < end
        };
        if inside {
            return Some(i);
        }
    }
    None
}

pub fn cusp_from_longitude(lon: f64) -> HouseCusp {
    let lon = normalize_longitude(lon);
    let idx = sign_index(lon);
    HouseCusp {
        sign: SIGN_CODES[idx].to_string(),
        position: lon - idx as f64 * 30.0,
        abs_pos: lon,
        element: ELEMENTS[idx % 4].to_string(),
        quality: QUALITIES[idx % 3].to_string(),
    }
}

pub fn placement_from_longitude(lon: f64, speed: f64, cusps: &[f64]) -> StructuredPlacement {
    let cusp = cusp_from_longitude(lon);
    StructuredPlacement {
        house: house_index(cusp.abs_pos, cusps).map(|i| HOUSE_CODES[i].to_string()),
        sign: cusp.sign,
        position: cusp.position,
        abs_pos: cusp.abs_pos,
        element: cusp.element,
        quality: cusp.quality,
        retrograde: speed < 0.0,
    }
}
