//! Builds a canonical [`BirthProfile`] from raw request fields.

use crate::error::ReportError;
use crate::profile::types::{
    BirthProfile, RawBirthData, ZodiacType, DEFAULT_CITY, DEFAULT_HOUSE_SYSTEM, DEFAULT_NATION,
    DEFAULT_PERSPECTIVE,
};

fn required<T: Clone>(value: &Option<T>, field: &'static str) -> Result<T, ReportError> {
    value.clone().ok_or(ReportError::MissingField { field })
}

fn parse_zodiac(value: Option<&str>) -> Result<ZodiacType, ReportError> {
    match value {
        None | Some("Tropical") | Some("Tropic") => Ok(ZodiacType::Tropical),
        Some("Sidereal") => Ok(ZodiacType::Sidereal),
        Some(other) => Err(ReportError::InvalidField {
            field: "zodiac_type",
            reason: format!("expected Tropical or Sidereal, got {other:?}"),
        }),
    }
}

/// Applies defaults and the required-field check. Fields are checked in the
/// order name, year, month, day, hour, minute; the first absent one is reported.
pub fn normalize(raw: &RawBirthData) -> Result<BirthProfile, ReportError> {
    let name = required(&raw.name, "name")?;
    let year = required(&raw.year, "year")?;
    let month = required(&raw.month, "month")?;
    let day = required(&raw.day, "day")?;
    let hour = required(&raw.hour, "hour")?;
    let minute = required(&raw.minute, "minute")?;

    let zodiac_type = parse_zodiac(raw.zodiac_type.as_deref())?;
    let sidereal_mode = match zodiac_type {
        ZodiacType::Sidereal => raw.sidereal_mode.clone(),
        ZodiacType::Tropical => None,
    };

    Ok(BirthProfile {
        name,
        year,
        month,
        day,
        hour,
        minute,
        city: raw.city.clone().unwrap_or_else(|| DEFAULT_CITY.to_string()),
        nation: raw.nation.clone().unwrap_or_else(|| DEFAULT_NATION.to_string()),
        lng: raw.lng,
        lat: raw.lat,
        tz_str: raw.tz_str.clone(),
        zodiac_type,
        sidereal_mode,
        houses_system: raw
            .houses_system
            .clone()
            .unwrap_or_else(|| DEFAULT_HOUSE_SYSTEM.to_string()),
        perspective_type: raw
            .perspective_type
            .clone()
            .unwrap_or_else(|| DEFAULT_PERSPECTIVE.to_string()),
        online: raw.online.unwrap_or(true),
        geonames_username: raw.geonames_username.clone(),
    })
}
