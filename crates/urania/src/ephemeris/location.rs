//! Coordinate and time-zone resolution for the Swiss adapter.
//!
//! Remote geocoding is not performed: a profile either carries coordinates or
//! matches an entry of the configured gazetteer.

use crate::ephemeris::EphemerisError;
use crate::profile::BirthProfile;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use urania_config::{find_location, LocationEntry};

/// A fixed UTC offset or an IANA zone with its daylight-saving rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl Zone {
    /// "+02:00" style offsets first, then IANA names ("Europe/Paris").
    pub fn parse(tz: &str) -> Option<Zone> {
        parse_utc_offset(tz)
            .map(Zone::Fixed)
            .or_else(|| tz.trim().parse::<Tz>().ok().map(Zone::Named))
    }

    /// UTC instant of a wall-clock time. A time repeated by a DST fall-back
    /// resolves to its first occurrence; a time skipped by a spring-forward
    /// gap has no instant.
    pub fn to_utc(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Fixed(offset) => offset.from_local_datetime(local).earliest().map(|dt| dt.with_timezone(&Utc)),
            Zone::Named(tz) => tz.from_local_datetime(local).earliest().map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub lat: f64,
    pub lng: f64,
    pub tz_str: String,
    pub zone: Zone,
}

/// Parses "UTC", "Z", "+02:00", "-0530" and "UTC+01:00" forms.
pub fn parse_utc_offset(tz: &str) -> Option<FixedOffset> {
    let tz = tz.trim();
    let rest = tz
        .strip_prefix("UTC")
        .or_else(|| tz.strip_prefix("GMT"))
        .or_else(|| tz.strip_prefix("Etc/UTC"))
        .unwrap_or(tz);
    if rest.is_empty() || rest == "Z" {
        return FixedOffset::east_opt(0);
    }
    let (sign, digits) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Explicit coordinates win; otherwise the gazetteer entry for city/nation.
/// The time zone comes from the profile when it parses, then from the entry.
pub fn resolve(profile: &BirthProfile, gazetteer: &[LocationEntry]) -> Result<ResolvedLocation, EphemerisError> {
    let entry = find_location(gazetteer, profile.city(), profile.nation());

    let (lat, lng) = match (profile.lat(), profile.lng(), entry) {
        (Some(lat), Some(lng), _) => (lat, lng),
        (_, _, Some(entry)) => (entry.lat, entry.lng),
        _ => {
            return Err(EphemerisError::LocationUnresolved {
                city: profile.city().to_string(),
                nation: profile.nation().to_string(),
            })
        }
    };

    let candidates = profile
        .tz_str()
        .into_iter()
        .chain(entry.map(|e| e.tz_str.as_str()));
    for tz in candidates {
        if let Some(zone) = Zone::parse(tz) {
            return Ok(ResolvedLocation { lat, lng, tz_str: tz.to_string(), zone });
        }
        log::warn!("Unsupported time zone {:?} for {}, trying fallback", tz, profile.name());
    }

    Ok(ResolvedLocation {
        lat,
        lng,
        tz_str: "UTC".to_string(),
        zone: Zone::Fixed(Utc.fix()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{normalize, RawBirthData};
    use chrono::NaiveDate;

    fn paris() -> Vec<LocationEntry> {
        vec![LocationEntry {
            city: "Paris".into(),
            nation: "FR".into(),
            lat: 48.8566,
            lng: 2.3522,
            tz_str: "Europe/Paris".into(),
        }]
    }

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, 0).unwrap()
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.from_utc_datetime(&local(y, mo, d, h, mi))
    }

    #[test]
    fn offsets() {
        assert_eq!(parse_utc_offset("UTC"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("Z"), FixedOffset::east_opt(0));
        assert_eq!(parse_utc_offset("+02:00"), FixedOffset::east_opt(7200));
        assert_eq!(parse_utc_offset("-0530"), FixedOffset::east_opt(-19800));
        assert_eq!(parse_utc_offset("UTC+1"), FixedOffset::east_opt(3600));
        assert_eq!(parse_utc_offset("Europe/Paris"), None);
        assert_eq!(parse_utc_offset("+25:99"), None);
    }

    #[test]
    fn zones_parse_offsets_and_names() {
        assert_eq!(Zone::parse("+03:00"), Some(Zone::Fixed(FixedOffset::east_opt(10800).unwrap())));
        assert_eq!(Zone::parse("America/New_York"), Some(Zone::Named(chrono_tz::America::New_York)));
        assert_eq!(Zone::parse("Mars/Olympus_Mons"), None);
    }

    #[test]
    fn named_zone_follows_daylight_saving() {
        let paris = Zone::parse("Europe/Paris").unwrap();
        // CEST in June, CET in January
        assert_eq!(paris.to_utc(&local(1990, 6, 15, 14, 30)), Some(utc(1990, 6, 15, 12, 30)));
        assert_eq!(paris.to_utc(&local(1990, 1, 15, 14, 30)), Some(utc(1990, 1, 15, 13, 30)));

        let new_york = Zone::parse("America/New_York").unwrap();
        assert_eq!(new_york.to_utc(&local(2000, 7, 4, 9, 0)), Some(utc(2000, 7, 4, 13, 0)));
    }

    #[test]
    fn daylight_saving_edges() {
        let paris = Zone::parse("Europe/Paris").unwrap();
        // 2024-03-31 02:30 does not exist in Paris
        assert_eq!(paris.to_utc(&local(2024, 3, 31, 2, 30)), None);
        // 2024-10-27 02:30 happens twice; the first (CEST) one is taken
        assert_eq!(paris.to_utc(&local(2024, 10, 27, 2, 30)), Some(utc(2024, 10, 27, 0, 30)));
    }

    #[test]
    fn gazetteer_fills_missing_coordinates() {
        let profile = normalize(&RawBirthData::new("A", 1990, 6, 15, 14, 30)).unwrap();
        let loc = resolve(&profile, &paris()).unwrap();
        assert_eq!(loc.lat, 48.8566);
        assert_eq!(loc.tz_str, "Europe/Paris");
        assert_eq!(loc.zone.to_utc(&local(1990, 6, 15, 14, 30)), Some(utc(1990, 6, 15, 12, 30)));
    }

    #[test]
    fn explicit_coordinates_and_zone_win() {
        let mut raw = RawBirthData::new("A", 1990, 6, 15, 14, 30);
        raw.lat = Some(10.0);
        raw.lng = Some(20.0);
        raw.tz_str = Some("+03:00".into());
        let loc = resolve(&normalize(&raw).unwrap(), &paris()).unwrap();
        assert_eq!((loc.lat, loc.lng), (10.0, 20.0));
        assert_eq!(loc.tz_str, "+03:00");
    }

    #[test]
    fn explicit_named_zone_outside_gazetteer() {
        let mut raw = RawBirthData::new("A", 1990, 6, 15, 14, 30).with_location("Boston", "US");
        raw.lat = Some(42.3601);
        raw.lng = Some(-71.0589);
        raw.tz_str = Some("America/New_York".into());
        let loc = resolve(&normalize(&raw).unwrap(), &paris()).unwrap();
        assert_eq!(loc.tz_str, "America/New_York");
        // EDT, four hours behind UTC
        assert_eq!(loc.zone.to_utc(&local(1990, 6, 15, 14, 30)), Some(utc(1990, 6, 15, 18, 30)));
    }

    #[test]
    fn unknown_zone_falls_back_to_gazetteer() {
        let mut raw = RawBirthData::new("A", 1990, 6, 15, 14, 30);
        raw.tz_str = Some("Somewhere/Else".into());
        let loc = resolve(&normalize(&raw).unwrap(), &paris()).unwrap();
        assert_eq!(loc.tz_str, "Europe/Paris");
    }

    #[test]
    fn unknown_city_without_coordinates_fails() {
        let raw = RawBirthData::new("A", 1990, 6, 15, 14, 30).with_location("Atlantis", "XX");
        let err = resolve(&normalize(&raw).unwrap(), &paris()).unwrap_err();
        assert!(matches!(err, EphemerisError::LocationUnresolved { .. }));
    }
}
