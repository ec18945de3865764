use crate::ephemeris::{BodyId, EphemerisChart, EphemerisEngine};
use crate::error::ReportError;
use crate::placements::sign_of;
use crate::profile::{normalize, BirthProfile};
use crate::rendering::{ArtifactRetriever, ChartArtifact, ChartKind, RenderOptions, RenderRequest};
use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;

/// Name given to every transit subject.
pub const TRANSIT_SUBJECT: &str = "Transit";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Wall-clock instant of an ISO timestamp. Offsets are kept as written, not
/// converted: the transit is cast in the natal location's time zone.
pub fn parse_transit_instant(value: &str) -> Result<NaiveDateTime, ReportError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| ReportError::InvalidTimestamp {
            value: value.to_string(),
        })
}

/// Requested instant, or the current local time.
pub fn resolve_transit_instant(value: Option<&str>) -> Result<NaiveDateTime, ReportError> {
    match value {
        Some(v) => parse_transit_instant(v),
        None => Ok(Local::now().naive_local()),
    }
}

/// Profile at `instant` sharing the natal location and time zone.
pub fn transit_profile(natal: &BirthProfile, instant: NaiveDateTime) -> Result<BirthProfile, ReportError> {
    normalize(&natal.relocated_raw(
        TRANSIT_SUBJECT,
        instant.year(),
        instant.month(),
        instant.day(),
        instant.hour(),
        instant.minute(),
    ))
}

#[derive(Debug, Clone, Serialize)]
pub struct NatalSummary {
    pub name: String,
    pub sun: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitPlanets {
    pub sun: String,
    pub moon: String,
    pub mercury: String,
    pub venus: String,
    pub mars: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransitReport {
    pub natal: NatalSummary,
    pub transit_date: String,
    pub transit_planets: TransitPlanets,
    pub interpretation: String,
    pub svg: ChartArtifact,
}

pub fn transit(
    engine: &dyn EphemerisEngine,
    natal_chart: &EphemerisChart,
    transit_profile: &BirthProfile,
    instant: NaiveDateTime,
    artifacts: &ArtifactRetriever,
    options: RenderOptions,
) -> Result<TransitReport, ReportError> {
    let lang = options.language;
    let transit_chart = engine.natal_chart(transit_profile)?;

    let aspects = engine
        .synastry_aspects(natal_chart, &transit_chart)
        .unwrap_or_else(|e| {
            log::warn!("Transit aspects unavailable for {}: {}", natal_chart.name, e);
            Vec::new()
        });
    let svg = artifacts.retrieve(&RenderRequest {
        kind: ChartKind::Transit,
        subject: natal_chart.name.clone(),
        primary: natal_chart,
        secondary: Some(&transit_chart),
        aspects: &aspects,
        options,
    });

    let sign = |body| sign_of(&transit_chart, body, lang);
    Ok(TransitReport {
        natal: NatalSummary {
            name: natal_chart.name.clone(),
            sun: sign_of(natal_chart, BodyId::Sun, lang),
        },
        transit_date: instant.format("%Y-%m-%dT%H:%M:%S").to_string(),
        transit_planets: TransitPlanets {
            sun: sign(BodyId::Sun),
            moon: sign(BodyId::Moon),
            mercury: sign(BodyId::Mercury),
            venus: sign(BodyId::Venus),
            mars: sign(BodyId::Mars),
        },
        interpretation: lang.transit_summary(&instant.format("%d/%m/%Y").to_string(), &natal_chart.name),
        svg,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::RawBirthData;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    #[test]
    fn accepted_timestamp_forms() {
        assert_eq!(parse_transit_instant("2024-03-01T12:30:15").unwrap(), at(2024, 3, 1, 12, 30, 15));
        assert_eq!(parse_transit_instant("2024-03-01T12:30").unwrap(), at(2024, 3, 1, 12, 30, 0));
        assert_eq!(parse_transit_instant("2024-03-01 08:05").unwrap(), at(2024, 3, 1, 8, 5, 0));
        assert_eq!(parse_transit_instant("2024-03-01").unwrap(), at(2024, 3, 1, 0, 0, 0));
        assert_eq!(
            parse_transit_instant("2024-03-01T12:30:00.250").unwrap().minute(),
            30
        );
    }

    #[test]
    fn offset_keeps_wall_clock() {
        assert_eq!(
            parse_transit_instant("2024-03-01T23:30:00+05:00").unwrap(),
            at(2024, 3, 1, 23, 30, 0)
        );
    }

    #[test]
    fn garbage_is_invalid_timestamp() {
        for bad in ["yesterday", "2024-13-01", "01/03/2024", ""] {
            let err = parse_transit_instant(bad).unwrap_err();
            assert!(matches!(err, ReportError::InvalidTimestamp { .. }), "{bad}");
            assert_eq!(err.status_code(), 400);
        }
    }

    #[test]
    fn transit_profile_shares_natal_location() {
        let mut raw = RawBirthData::new("Jean", 1990, 6, 15, 14, 30).with_location("Lyon", "FR");
        raw.lat = Some(45.76);
        raw.lng = Some(4.83);
        raw.tz_str = Some("+01:00".into());
        let natal = normalize(&raw).unwrap();
        let profile = transit_profile(&natal, at(2024, 3, 1, 12, 30, 0)).unwrap();
        assert_eq!(profile.name(), "Transit");
        assert_eq!(profile.city(), "Lyon");
        assert_eq!(profile.lat(), Some(45.76));
        assert_eq!(profile.tz_str(), Some("+01:00"));
        assert_eq!((profile.year(), profile.hour(), profile.minute()), (2024, 12, 30));
    }
}
