use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CITY: &str = "Paris";
pub const DEFAULT_NATION: &str = "FR";
/// Placidus.
pub const DEFAULT_HOUSE_SYSTEM: &str = "P";
pub const DEFAULT_PERSPECTIVE: &str = "Apparent Geocentric";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ZodiacType {
    #[default]
    Tropical,
    Sidereal,
}

impl fmt::Display for ZodiacType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZodiacType::Tropical => write!(f, "Tropical"),
            ZodiacType::Sidereal => write!(f, "Sidereal"),
        }
    }
}

/// Birth data exactly as it arrives in a request body. Every field is optional
/// here; the normalizer decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBirthData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub hour: Option<u32>,
    #[serde(default)]
    pub minute: Option<u32>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub nation: Option<String>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub tz_str: Option<String>,
    #[serde(default)]
    pub zodiac_type: Option<String>,
    #[serde(default)]
    pub sidereal_mode: Option<String>,
    #[serde(default)]
    pub houses_system: Option<String>,
    #[serde(default)]
    pub perspective_type: Option<String>,
    #[serde(default)]
    pub online: Option<bool>,
    #[serde(default)]
    pub geonames_username: Option<String>,
}

impl RawBirthData {
    /// Raw data with only the required identity fields filled in.
    pub fn new(name: impl Into<String>, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            name: Some(name.into()),
            year: Some(year),
            month: Some(month),
            day: Some(day),
            hour: Some(hour),
            minute: Some(minute),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, city: impl Into<String>, nation: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.nation = Some(nation.into());
        self
    }
}

/// Canonical birth profile. Fields are only reachable through accessors so a
/// profile cannot change after normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthProfile {
    pub(crate) name: String,
    pub(crate) year: i32,
    pub(crate) month: u32,
    pub(crate) day: u32,
    pub(crate) hour: u32,
    pub(crate) minute: u32,
    pub(crate) city: String,
    pub(crate) nation: String,
    pub(crate) lng: Option<f64>,
    pub(crate) lat: Option<f64>,
    pub(crate) tz_str: Option<String>,
    pub(crate) zodiac_type: ZodiacType,
    pub(crate) sidereal_mode: Option<String>,
    pub(crate) houses_system: String,
    pub(crate) perspective_type: String,
    pub(crate) online: bool,
    pub(crate) geonames_username: Option<String>,
}

impl BirthProfile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn nation(&self) -> &str {
        &self.nation
    }

    pub fn lng(&self) -> Option<f64> {
        self.lng
    }

    pub fn lat(&self) -> Option<f64> {
        self.lat
    }

    pub fn tz_str(&self) -> Option<&str> {
        self.tz_str.as_deref()
    }

    pub fn zodiac_type(&self) -> ZodiacType {
        self.zodiac_type
    }

    /// Only ever set for sidereal profiles.
    pub fn sidereal_mode(&self) -> Option<&str> {
        self.sidereal_mode.as_deref()
    }

    pub fn houses_system(&self) -> &str {
        &self.houses_system
    }

    pub fn perspective_type(&self) -> &str {
        &self.perspective_type
    }

    pub fn online(&self) -> bool {
        self.online
    }

    pub fn geonames_username(&self) -> Option<&str> {
        self.geonames_username.as_deref()
    }

    /// "15/6/1990"
    pub fn birth_date_label(&self) -> String {
        format!("{}/{}/{}", self.day, self.month, self.year)
    }

    /// "14:30", "9:05"
    pub fn birth_time_label(&self) -> String {
        format!("{}:{:02}", self.hour, self.minute)
    }

    pub fn location_label(&self) -> String {
        format!("{}, {}", self.city, self.nation)
    }

    /// Raw fields that rebuild a profile at a different instant in the same place.
    pub(crate) fn relocated_raw(&self, name: &str, year: i32, month: u32, day: u32, hour: u32, minute: u32) -> RawBirthData {
        RawBirthData {
            city: Some(self.city.clone()),
            nation: Some(self.nation.clone()),
            lng: self.lng,
            lat: self.lat,
            tz_str: self.tz_str.clone(),
            online: Some(self.online),
            geonames_username: self.geonames_username.clone(),
            ..RawBirthData::new(name, year, month, day, hour, minute)
        }
    }
}
