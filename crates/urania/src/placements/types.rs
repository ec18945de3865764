use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

/// One body, localized and rounded for output.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct PlacementEntry {
    pub planet_name: String,
    pub sign: String,
    pub position: f64,
    pub house: String,
    pub element: String,
    pub quality: String,
    pub retrograde: bool,
    pub interpretation: String,
}

/// A body that could be reported, or the inline marker left in its place.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
#[serde(untagged)]
pub enum BodyReport {
    Placement(PlacementEntry),
    Unreadable { error: String },
}

impl BodyReport {
    pub fn placement(&self) -> Option<&PlacementEntry> {
        match self {
            BodyReport::Placement(entry) => Some(entry),
            BodyReport::Unreadable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct HouseEntry {
    pub sign: String,
    pub position: f64,
    pub element: String,
    pub quality: String,
}

/// Insertion-ordered map serialised as a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Keyed<T>(Vec<(&'static str, T)>);

impl<T> Keyed<T> {
    pub fn new() -> Self {
        Keyed(Vec::new())
    }

    pub fn push(&mut self, key: &'static str, value: T) {
        self.0.push((key, value));
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &T)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

impl<T> Default for Keyed<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Serialize> Serialize for Keyed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Headline strings of a natal report.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct Interpretations {
    pub sun_sign: String,
    pub moon_sign: String,
    pub ascendant: String,
    pub dominant_element: String,
    pub personality_summary: String,
}

/// Bodies, houses and headlines for one chart.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PlacementReport {
    pub planets: Keyed<BodyReport>,
    pub houses: Keyed<HouseEntry>,
    pub interpretations: Interpretations,
}

/// Localized sun, moon and ascendant signs of one chart.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct Headline {
    pub name: String,
    pub sun: String,
    pub moon: String,
    pub ascendant: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct PersonalityReading {
    pub sun_sign: String,
    pub moon_sign: String,
    pub ascendant: String,
    pub dominant_element: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct CareerReading {
    pub tenth_house: String,
    pub saturn: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct RelationshipReading {
    pub seventh_house: String,
    pub venus: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct SpiritualityReading {
    pub ninth_house: String,
    pub jupiter: String,
}

/// Themed readings served by the interpretations endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize, Deserialize)]
pub struct DetailedInterpretations {
    pub personality: PersonalityReading,
    pub career: CareerReading,
    pub relationships: RelationshipReading,
    pub spirituality: SpiritualityReading,
}
