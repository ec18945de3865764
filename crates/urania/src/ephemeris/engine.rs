use crate::aspects::Aspect;
use crate::ephemeris::types::EphemerisChart;
use crate::profile::BirthProfile;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid ayanamsa: {ayanamsa}. Valid ayanamsas: {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("Invalid perspective: {perspective}. Valid perspectives: {valid:?}")]
    InvalidPerspective { perspective: String, valid: Vec<String> },
    #[error("Invalid birth date or time: {message}")]
    InvalidDate { message: String },
    #[error("Could not resolve location {city}, {nation}: no coordinates given and no known entry")]
    LocationUnresolved { city: String, nation: String },
    #[error("Failed to calculate position for {body}: {message}")]
    CalculationFailed { body: String, message: String },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
}

/// Position source for every chart. Implementations may block (file I/O,
/// location lookups); callers run them on their own thread.
pub trait EphemerisEngine: Send + Sync {
    /// Placements and house cusps at the profile's birth instant.
    fn natal_chart(&self, profile: &BirthProfile) -> Result<EphemerisChart, EphemerisError>;

    /// Midpoint composite of two profiles.
    fn composite_chart(
        &self,
        first: &BirthProfile,
        second: &BirthProfile,
    ) -> Result<EphemerisChart, EphemerisError>;

    /// Aspects between the bodies of one chart.
    fn natal_aspects(&self, chart: &EphemerisChart) -> Result<Vec<Aspect>, EphemerisError>;

    /// Aspects from every body of `first` to every body of `second`.
    fn synastry_aspects(
        &self,
        first: &EphemerisChart,
        second: &EphemerisChart,
    ) -> Result<Vec<Aspect>, EphemerisError>;
}
