use crate::aspects::{Aspect, AspectCalculator};
use crate::ephemeris::engine::{EphemerisEngine, EphemerisError};
use crate::ephemeris::location::{self, ResolvedLocation};
use crate::ephemeris::types::{BodyId, EphemerisChart, PlacementSource};
use crate::ephemeris::zodiac;
use crate::profile::{BirthProfile, ZodiacType};
use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path};
use swisseph::{AscMc, Cusp};
use urania_config::LocationEntry;

/// Swiss Ephemeris body codes.
fn body_code(body: BodyId) -> u32 {
    match body {
        BodyId::Sun => 0,
        BodyId::Moon => 1,
        BodyId::Mercury => 2,
        BodyId::Venus => 3,
        BodyId::Mars => 4,
        BodyId::Jupiter => 5,
        BodyId::Saturn => 6,
        BodyId::Uranus => 7,
        BodyId::Neptune => 8,
        BodyId::Pluto => 9,
        BodyId::MeanNode => 10,
        BodyId::TrueNode => 11,
        BodyId::MeanLilith => 12,
        BodyId::Chiron => 15,
    }
}

/// House system mapping, by name and by single-letter identifier
const HOUSE_SYSTEMS: &[(&str, u8)] = &[
    ("placidus", b'P'),
    ("whole_sign", b'W'),
    ("koch", b'K'),
    ("equal", b'E'),
    ("regiomontanus", b'R'),
    ("campanus", b'C'),
    ("alcabitius", b'A'),
    ("morinus", b'M'),
    ("porphyry", b'O'),
];

/// Ayanamsa mapping - Swiss Ephemeris SIDM_* constants
const AYANAMSAS: &[(&str, i32)] = &[
    ("fagan_bradley", 0),
    ("lahiri", 1),
    ("deluce", 2),
    ("raman", 3),
    ("ushashashi", 4),
    ("krishnamurti", 5),
    ("djwhal_khul", 6),
    ("yukteshwar", 7),
    ("jn_bhasin", 8),
    ("true_citra", 27),
    ("true_revati", 28),
    ("aryabhata", 23),
];

/// Perspective flags
const PERSPECTIVES: &[(&str, i32)] = &[
    ("apparent geocentric", 0),
    ("heliocentric", 8),   // FLG_HELCTR
    ("true geocentric", 16), // FLG_TRUEPOS
];

const FLG_SWIEPH: i32 = 2;
const FLG_SPEED: i32 = 256;
const FLG_SIDEREAL: i32 = 64 * 1024;

/// Swiss Ephemeris engine. All calls go through one lock because the
/// underlying library keeps global state (sidereal mode, file handles).
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    gazetteer: Vec<LocationEntry>,
    current_sidereal_mode: Mutex<Option<i32>>,
    aspects: AspectCalculator,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path and a location table for
    /// profiles without coordinates.
    pub fn new(ephemeris_path: Option<PathBuf>, gazetteer: Vec<LocationEntry>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let path_str = path.to_str().ok_or_else(|| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: "Ephemeris path is not valid UTF-8.".to_string(),
        })?;
        set_ephe_path(path_str);
        log::debug!("Swiss Ephemeris data path set to {}", path_str);

        Ok(Self {
            ephemeris_path: path,
            gazetteer,
            current_sidereal_mode: Mutex::new(None),
            aspects: AspectCalculator::new(),
        })
    }

    pub fn ephemeris_path(&self) -> &std::path::Path {
        &self.ephemeris_path
    }

    fn compute(&self, profile: &BirthProfile) -> Result<RawChart, EphemerisError> {
        let location = location::resolve(profile, &self.gazetteer)?;
        let dt_utc = birth_instant_utc(profile, &location)?;
        let jd = datetime_to_julian_day(dt_utc);
        let house_system_byte = get_house_system_byte(profile.houses_system())?;

        // Held for the whole computation: sidereal mode is global library state.
        let mut sidereal_mode = self
            .current_sidereal_mode
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let flags = configure_flags(profile, &mut sidereal_mode)?;

        let mut longitudes = Vec::with_capacity(BodyId::ALL.len());
        for body in BodyId::ALL {
            let result = self.calc_body_position(body, jd, flags);
            if let Err(e) = &result {
                log::warn!("{} unavailable for {}: {}", body.name(), profile.name(), e);
            }
            longitudes.push((body, result));
        }

        let cusps = self.calc_house_cusps(jd, location.lat, location.lng, house_system_byte, flags)?;

        Ok(RawChart {
            name: profile.name().to_string(),
            zodiac_type: profile.zodiac_type(),
            location,
            longitudes,
            cusps,
        })
    }

    /// Longitude and speed for a single body
    fn calc_body_position(&self, body: BodyId, jd: f64, flags: i32) -> Result<(f64, f64), EphemerisError> {
        let result = calc_ut(jd, body_code(body), flags as u32).map_err(|e| EphemerisError::CalculationFailed {
            body: body.name().to_string(),
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let out = result.out;
        Ok((zodiac::normalize_longitude(out[0]), out[3]))
    }

    /// House cusps one to twelve
    fn calc_house_cusps(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        house_system_byte: u8,
        flags: i32,
    ) -> Result<Vec<f64>, EphemerisError> {
        let (c, a) = houses_ex(jd, flags, lat, lon, house_system_byte as i32);
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if values.iter().any(|v| !v.is_finite()) || !ascmc.ascendant.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("non-finite cusps at latitude {lat}"),
            });
        }
        Ok(values.iter().map(|v| zodiac::normalize_longitude(*v)).collect())
    }
}

/// Configure Swiss Ephemeris flags for the requested zodiac and perspective
fn configure_flags(profile: &BirthProfile, sidereal_mode: &mut Option<i32>) -> Result<i32, EphemerisError> {
    let mut flags = FLG_SWIEPH | FLG_SPEED;
    flags |= resolve_perspective(profile.perspective_type())?;

    if profile.zodiac_type() == ZodiacType::Sidereal {
        let mode = resolve_ayanamsa(profile.sidereal_mode())?;
        apply_sidereal_mode(sidereal_mode, mode);
        flags |= FLG_SIDEREAL;
    }

    Ok(flags)
}

/// Hands the ayanamsa to the library unless it is already the active one.
/// Returns whether the library was called. Caller holds the adapter lock.
fn apply_sidereal_mode(current: &mut Option<i32>, mode: i32) -> bool {
    if *current == Some(mode) {
        return false;
    }
    // SAFETY: plain value arguments; concurrent library access is serialised
    // by the adapter mutex the caller holds.
    unsafe { libswisseph_sys::tuple_result::swe_set_sid_mode(mode, 0.0, 0.0) };
    *current = Some(mode);
    true
}

/// Intermediate result before placements are derived.
struct RawChart {
    name: String,
    zodiac_type: ZodiacType,
    location: ResolvedLocation,
    longitudes: Vec<(BodyId, Result<(f64, f64), EphemerisError>)>,
    cusps: Vec<f64>,
}

impl RawChart {
    fn into_chart(self) -> EphemerisChart {
        let mut bodies = BTreeMap::new();
        for (body, result) in self.longitudes {
            let source = match result {
                Ok((lon, speed)) => {
                    PlacementSource::Structured(zodiac::placement_from_longitude(lon, speed, &self.cusps))
                }
                Err(e) => PlacementSource::RawAttributeBag(serde_json::Value::String(e.to_string())),
            };
            bodies.insert(body, source);
        }
        EphemerisChart {
            name: self.name,
            lng: self.location.lng,
            lat: self.location.lat,
            tz_str: self.location.tz_str,
            zodiac_type: self.zodiac_type,
            bodies,
            houses: self.cusps.iter().map(|c| zodiac::cusp_from_longitude(*c)).collect(),
        }
    }
}

/// Midpoints of bodies and cusps. A body missing from either side stays missing.
fn midpoint_chart(first: RawChart, second: RawChart) -> RawChart {
    let cusps: Vec<f64> = first
        .cusps
        .iter()
        .zip(second.cusps.iter())
        .map(|(a, b)| zodiac::midpoint(*a, *b))
        .collect();

    let longitudes = first
        .longitudes
        .into_iter()
        .zip(second.longitudes)
        .map(|((body, a), (_, b))| {
            let combined = match (a, b) {
                (Ok((lon_a, speed_a)), Ok((lon_b, speed_b))) => {
                    Ok((zodiac::midpoint(lon_a, lon_b), (speed_a + speed_b) / 2.0))
                }
                (Err(e), _) | (_, Err(e)) => Err(e),
            };
            (body, combined)
        })
        .collect();

    RawChart {
        name: format!("{} & {}", first.name, second.name),
        zodiac_type: first.zodiac_type,
        location: ResolvedLocation {
            lat: (first.location.lat + second.location.lat) / 2.0,
            lng: (first.location.lng + second.location.lng) / 2.0,
            tz_str: first.location.tz_str,
            zone: first.location.zone,
        },
        longitudes,
        cusps,
    }
}

impl EphemerisEngine for SwissEphemerisAdapter {
    fn natal_chart(&self, profile: &BirthProfile) -> Result<EphemerisChart, EphemerisError> {
        Ok(self.compute(profile)?.into_chart())
    }

    fn composite_chart(&self, first: &BirthProfile, second: &BirthProfile) -> Result<EphemerisChart, EphemerisError> {
        let a = self.compute(first)?;
        let b = self.compute(second)?;
        Ok(midpoint_chart(a, b).into_chart())
    }

    fn natal_aspects(&self, chart: &EphemerisChart) -> Result<Vec<Aspect>, EphemerisError> {
        Ok(self.aspects.within_chart(chart))
    }

    fn synastry_aspects(&self, first: &EphemerisChart, second: &EphemerisChart) -> Result<Vec<Aspect>, EphemerisError> {
        Ok(self.aspects.between_charts(first, second))
    }
}

/// Local birth time converted with the resolved offset
fn birth_instant_utc(profile: &BirthProfile, location: &ResolvedLocation) -> Result<DateTime<Utc>, EphemerisError> {
    let naive = NaiveDate::from_ymd_opt(profile.year(), profile.month(), profile.day())
        .and_then(|d| d.and_hms_opt(profile.hour(), profile.minute(), 0))
        .ok_or_else(|| EphemerisError::InvalidDate {
            message: format!(
                "{}/{}/{} {}",
                profile.day(),
                profile.month(),
                profile.year(),
                profile.birth_time_label()
            ),
        })?;
    location.zone.to_utc(&naive).ok_or_else(|| EphemerisError::InvalidDate {
        message: format!("{naive} does not exist in {}", location.tz_str),
    })
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour = dt.hour() as f64;
    let minute = dt.minute() as f64;
    let second = dt.second() as f64;
    let hour_decimal = hour + minute / 60.0 + second / 3600.0;

    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}

/// Convert house system name or letter to byte format
fn get_house_system_byte(house_system: &str) -> Result<u8, EphemerisError> {
    let by_letter = match house_system.as_bytes() {
        [letter] => HOUSE_SYSTEMS
            .iter()
            .find(|(_, byte)| *byte == letter.to_ascii_uppercase())
            .map(|(_, byte)| *byte),
        _ => None,
    };
    by_letter
        .or_else(|| {
            HOUSE_SYSTEMS
                .iter()
                .find(|(name, _)| *name == house_system.to_lowercase())
                .map(|(_, byte)| *byte)
        })
        .ok_or_else(|| EphemerisError::InvalidHouseSystem {
            system: house_system.to_string(),
            valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}

/// Map ayanamsa string to Swiss constant; Lahiri when unspecified
fn resolve_ayanamsa(ayanamsa: Option<&str>) -> Result<i32, EphemerisError> {
    let ayanamsa = ayanamsa.unwrap_or("lahiri");
    AYANAMSAS
        .iter()
        .find(|(name, _)| *name == ayanamsa.to_lowercase())
        .map(|(_, mode)| *mode)
        .ok_or_else(|| EphemerisError::InvalidAyanamsa {
            ayanamsa: ayanamsa.to_string(),
            valid: AYANAMSAS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}

fn resolve_perspective(perspective: &str) -> Result<i32, EphemerisError> {
    PERSPECTIVES
        .iter()
        .find(|(name, _)| *name == perspective.to_lowercase())
        .map(|(_, flag)| *flag)
        .ok_or_else(|| EphemerisError::InvalidPerspective {
            perspective: perspective.to_string(),
            valid: PERSPECTIVES.iter().map(|(name, _)| name.to_string()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::location::Zone;
    use chrono::Offset;

    #[test]
    fn house_system_by_letter_or_name() {
        assert_eq!(get_house_system_byte("P").unwrap(), b'P');
        assert_eq!(get_house_system_byte("k").unwrap(), b'K');
        assert_eq!(get_house_system_byte("Whole_Sign").unwrap(), b'W');
        assert!(matches!(
            get_house_system_byte("Z"),
            Err(EphemerisError::InvalidHouseSystem { .. })
        ));
    }

    #[test]
    fn ayanamsa_names_are_case_insensitive() {
        assert_eq!(resolve_ayanamsa(Some("LAHIRI")).unwrap(), 1);
        assert_eq!(resolve_ayanamsa(None).unwrap(), 1);
        assert_eq!(resolve_ayanamsa(Some("FAGAN_BRADLEY")).unwrap(), 0);
        assert!(resolve_ayanamsa(Some("unknown")).is_err());
    }

    #[test]
    fn perspectives() {
        assert_eq!(resolve_perspective("Apparent Geocentric").unwrap(), 0);
        assert_eq!(resolve_perspective("Heliocentric").unwrap(), 8);
        assert!(resolve_perspective("Topocentric").is_err());
    }

    fn raw_chart(name: &str, sun: f64, cusp_start: f64) -> RawChart {
        RawChart {
            name: name.to_string(),
            zodiac_type: ZodiacType::Tropical,
            location: ResolvedLocation {
                lat: 40.0,
                lng: 0.0,
                tz_str: "UTC".into(),
                zone: Zone::Fixed(Utc.fix()),
            },
            longitudes: vec![
                (BodyId::Sun, Ok((sun, 1.0))),
                (
                    BodyId::Chiron,
                    Err(EphemerisError::CalculationFailed {
                        body: "Chiron".into(),
                        message: "missing seas file".into(),
                    }),
                ),
            ],
            cusps: (0..12).map(|i| zodiac::normalize_longitude(cusp_start + i as f64 * 30.0)).collect(),
        }
    }

    #[test]
    fn failed_body_becomes_unreadable_bag() {
        let chart = raw_chart("A", 84.0, 0.0).into_chart();
        assert!(chart.structured(BodyId::Sun).is_some());
        assert!(matches!(
            chart.bodies.get(&BodyId::Chiron),
            Some(PlacementSource::RawAttributeBag(serde_json::Value::String(_)))
        ));
        assert_eq!(chart.houses.len(), 12);
    }

    #[test]
    fn composite_uses_midpoints() {
        let chart = midpoint_chart(raw_chart("A", 10.0, 0.0), raw_chart("B", 50.0, 20.0)).into_chart();
        assert_eq!(chart.name, "A & B");
        let sun = chart.structured(BodyId::Sun).unwrap();
        assert!((sun.abs_pos - 30.0).abs() < 1e-9);
        assert_eq!(sun.sign, "Tau");
        assert!((chart.houses[0].abs_pos - 10.0).abs() < 1e-9);
    }

    #[test]
    fn sidereal_mode_reaches_the_library_once() {
        let jd = julday(1990, 6, 15, 12.5, 1);
        let mut current = None;

        assert!(apply_sidereal_mode(&mut current, 1));
        let lahiri = swisseph::swe::get_ayanamsa_ut(jd);
        assert!(!apply_sidereal_mode(&mut current, 1));

        assert!(apply_sidereal_mode(&mut current, 0));
        let fagan_bradley = swisseph::swe::get_ayanamsa_ut(jd);
        assert_eq!(current, Some(0));

        assert!((lahiri - 23.7).abs() < 0.3, "{lahiri}");
        assert!((fagan_bradley - lahiri - 0.88).abs() < 0.1, "{fagan_bradley}");
    }

    #[test]
    fn birth_instant_uses_zone_rules() {
        let profile = crate::profile::normalize(&crate::profile::RawBirthData::new("A", 1990, 6, 15, 14, 30)).unwrap();
        let location = ResolvedLocation {
            lat: 48.8566,
            lng: 2.3522,
            tz_str: "Europe/Paris".into(),
            zone: Zone::parse("Europe/Paris").unwrap(),
        };
        let utc = birth_instant_utc(&profile, &location).unwrap();
        assert_eq!((utc.hour(), utc.minute()), (12, 30));

        let gap = crate::profile::normalize(&crate::profile::RawBirthData::new("A", 2024, 3, 31, 2, 30)).unwrap();
        assert!(matches!(
            birth_instant_utc(&gap, &location),
            Err(EphemerisError::InvalidDate { .. })
        ));
    }
}
