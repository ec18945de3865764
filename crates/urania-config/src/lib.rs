use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Known location used when a birth profile carries no explicit coordinates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LocationEntry {
    pub city: String,
    pub nation: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default = "default_tz")]
    pub tz_str: String,
}

fn default_tz() -> String {
    "UTC".to_string()
}

fn default_language() -> String {
    "FR".to_string()
}

fn default_theme() -> String {
    "classic".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_language")]
    pub default_language: String,
    #[serde(default = "default_theme")]
    pub default_theme: String,
    /// Base directory for per-request chart storage. System temp dir when unset.
    #[serde(default)]
    pub chart_dir: Option<PathBuf>,
    /// None keeps every chart for the process lifetime.
    #[serde(default)]
    pub cache_capacity: Option<usize>,
    #[serde(default)]
    pub ephemeris_path: Option<PathBuf>,
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationEntry>,
}

fn default_locations() -> Vec<LocationEntry> {
    vec![LocationEntry {
        city: "Paris".to_string(),
        nation: "FR".to_string(),
        lat: 48.8566,
        lng: 2.3522,
        tz_str: "Europe/Paris".to_string(),
    }]
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            default_theme: default_theme(),
            chart_dir: None,
            cache_capacity: None,
            ephemeris_path: None,
            locations: default_locations(),
        }
    }
}

/// Case-insensitive gazetteer lookup.
pub fn find_location<'a>(locations: &'a [LocationEntry], city: &str, nation: &str) -> Option<&'a LocationEntry> {
    locations
        .iter()
        .find(|entry| entry.city.eq_ignore_ascii_case(city) && entry.nation.eq_ignore_ascii_case(nation))
}

const DEFAULT_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

pub fn parse_service_config(text: &str) -> anyhow::Result<ServiceConfig> {
    toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse urania.toml: {e}"))
}

/// Reads the file at `path`, failing if it is missing or malformed.
pub fn load_service_config_from(path: &Path) -> anyhow::Result<ServiceConfig> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
    parse_service_config(&text)
}

/// Tries the common relative locations of `configs/urania.toml`, falling back to
/// defaults when none exists. A file that exists but does not parse is an error.
pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    for p in &DEFAULT_PATHS {
        if let Ok(text) = fs::read_to_string(p) {
            return parse_service_config(&text);
        }
    }
    Ok(ServiceConfig::default())
}
