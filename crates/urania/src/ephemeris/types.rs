use crate::profile::ZodiacType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bodies reported for every chart, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyId {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    MeanNode,
    TrueNode,
    Chiron,
    MeanLilith,
}

impl BodyId {
    pub const ALL: [BodyId; 14] = [
        BodyId::Sun,
        BodyId::Moon,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Uranus,
        BodyId::Neptune,
        BodyId::Pluto,
        BodyId::MeanNode,
        BodyId::TrueNode,
        BodyId::Chiron,
        BodyId::MeanLilith,
    ];

    /// Report key: "sun", "mean_node".
    pub fn key(&self) -> &'static str {
        match self {
            BodyId::Sun => "sun",
            BodyId::Moon => "moon",
            BodyId::Mercury => "mercury",
            BodyId::Venus => "venus",
            BodyId::Mars => "mars",
            BodyId::Jupiter => "jupiter",
            BodyId::Saturn => "saturn",
            BodyId::Uranus => "uranus",
            BodyId::Neptune => "neptune",
            BodyId::Pluto => "pluto",
            BodyId::MeanNode => "mean_node",
            BodyId::TrueNode => "true_node",
            BodyId::Chiron => "chiron",
            BodyId::MeanLilith => "mean_lilith",
        }
    }

    /// Engine-facing name: "Sun", "Mean_Node".
    pub fn name(&self) -> &'static str {
        match self {
            BodyId::Sun => "Sun",
            BodyId::Moon => "Moon",
            BodyId::Mercury => "Mercury",
            BodyId::Venus => "Venus",
            BodyId::Mars => "Mars",
            BodyId::Jupiter => "Jupiter",
            BodyId::Saturn => "Saturn",
            BodyId::Uranus => "Uranus",
            BodyId::Neptune => "Neptune",
            BodyId::Pluto => "Pluto",
            BodyId::MeanNode => "Mean_Node",
            BodyId::TrueNode => "True_Node",
            BodyId::Chiron => "Chiron",
            BodyId::MeanLilith => "Mean_Lilith",
        }
    }
}

/// Report keys of the twelve houses, first to twelfth.
pub const HOUSE_KEYS: [&str; 12] = [
    "first_house",
    "second_house",
    "third_house",
    "fourth_house",
    "fifth_house",
    "sixth_house",
    "seventh_house",
    "eighth_house",
    "ninth_house",
    "tenth_house",
    "eleventh_house",
    "twelfth_house",
];

/// Engine house codes, first to twelfth.
pub const HOUSE_CODES: [&str; 12] = [
    "First_House",
    "Second_House",
    "Third_House",
    "Fourth_House",
    "Fifth_House",
    "Sixth_House",
    "Seventh_House",
    "Eighth_House",
    "Ninth_House",
    "Tenth_House",
    "Eleventh_House",
    "Twelfth_House",
];

/// Well-formed body placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredPlacement {
    /// Sign code: "Ari" .. "Pis"
    pub sign: String,
    /// Degrees within the sign (0-30), full precision
    pub position: f64,
    /// Ecliptic longitude (0-360)
    pub abs_pos: f64,
    pub element: String,
    pub quality: String,
    /// House code ("First_House"), None when unresolved
    pub house: Option<String>,
    pub retrograde: bool,
}

/// Body data as handed over by the engine. Engines that cannot produce a typed
/// placement pass along whatever attribute map they have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlacementSource {
    Structured(StructuredPlacement),
    RawAttributeBag(serde_json::Value),
}

/// House cusp. Always well-formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub sign: String,
    pub position: f64,
    pub abs_pos: f64,
    pub element: String,
    pub quality: String,
}

/// Everything the engine computed for one chart subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisChart {
    pub name: String,
    pub lng: f64,
    pub lat: f64,
    pub tz_str: String,
    pub zodiac_type: ZodiacType,
    pub bodies: BTreeMap<BodyId, PlacementSource>,
    /// First to twelfth house.
    pub houses: Vec<HouseCusp>,
}

impl EphemerisChart {
    pub fn structured(&self, body: BodyId) -> Option<&StructuredPlacement> {
        match self.bodies.get(&body) {
            Some(PlacementSource::Structured(p)) => Some(p),
            _ => None,
        }
    }

    /// Structured bodies in report order.
    pub fn structured_bodies(&self) -> impl Iterator<Item = (BodyId, &StructuredPlacement)> {
        self.bodies.iter().filter_map(|(id, source)| match source {
            PlacementSource::Structured(p) => Some((*id, p)),
            PlacementSource::RawAttributeBag(_) => None,
        })
    }

    pub fn first_house(&self) -> Option<&HouseCusp> {
        self.houses.first()
    }
}
