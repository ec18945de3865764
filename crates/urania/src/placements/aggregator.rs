use crate::ephemeris::types::{BodyId, EphemerisChart, HouseCusp, PlacementSource, StructuredPlacement, HOUSE_KEYS};
use crate::placements::labels::{fill, Language};
use crate::placements::types::{
    BodyReport, CareerReading, DetailedInterpretations, Headline, HouseEntry, Interpretations, Keyed,
    PersonalityReading, PlacementEntry, PlacementReport, RelationshipReading, SpiritualityReading,
};
use serde_json::Value;

/// Output precision for positions.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Single conversion from engine output to a typed placement. Attribute bags are
/// recovered field by field, each unreadable field taking its default; anything
/// that is not an attribute map cannot be recovered.
pub fn normalize_placement(source: &PlacementSource) -> Option<StructuredPlacement> {
    match source {
        PlacementSource::Structured(p) => Some(p.clone()),
        PlacementSource::RawAttributeBag(Value::Object(fields)) => {
            let text = |key: &str| fields.get(key).and_then(Value::as_str).unwrap_or("").to_string();
            let position = fields.get("position").and_then(Value::as_f64).unwrap_or(0.0);
            Some(StructuredPlacement {
                sign: text("sign"),
                position,
                abs_pos: fields.get("abs_pos").and_then(Value::as_f64).unwrap_or(position),
                element: text("element"),
                quality: text("quality"),
                house: fields
                    .get("house")
                    .and_then(Value::as_str)
                    .filter(|h| !h.is_empty())
                    .map(str::to_string),
                retrograde: fields.get("retrograde").and_then(Value::as_bool).unwrap_or(false),
            })
        }
        PlacementSource::RawAttributeBag(_) => None,
    }
}

fn body_entry(body: BodyId, placement: &StructuredPlacement, lang: Language) -> PlacementEntry {
    let planet_name = lang.body(body);
    let sign = lang.sign(&placement.sign);
    let house = placement
        .house
        .as_deref()
        .map(|h| lang.house(h))
        .unwrap_or_else(|| lang.unknown());

    PlacementEntry {
        planet_name: planet_name.to_string(),
        sign: sign.to_string(),
        position: round2(placement.position),
        house: house.to_string(),
        element: placement.element.clone(),
        quality: placement.quality.clone(),
        retrograde: placement.retrograde,
        interpretation: lang.placement_sentence(planet_name, sign, placement.position, house),
    }
}

fn house_entry(cusp: &HouseCusp, lang: Language) -> HouseEntry {
    HouseEntry {
        sign: lang.sign(&cusp.sign).to_string(),
        position: round2(cusp.position),
        element: cusp.element.clone(),
        quality: cusp.quality.clone(),
    }
}

/// Localized sign of a body, or the localized "Unknown" when it cannot be read.
pub fn sign_of(chart: &EphemerisChart, body: BodyId, lang: Language) -> String {
    chart
        .bodies
        .get(&body)
        .and_then(normalize_placement)
        .map(|p| lang.sign(&p.sign).to_string())
        .unwrap_or_else(|| lang.unknown().to_string())
}

pub fn ascendant_of(chart: &EphemerisChart, lang: Language) -> String {
    house_sign(chart, 0, lang)
}

fn house_sign(chart: &EphemerisChart, index: usize, lang: Language) -> String {
    chart
        .houses
        .get(index)
        .map(|cusp| lang.sign(&cusp.sign).to_string())
        .unwrap_or_else(|| lang.unknown().to_string())
}

/// Sun, moon and ascendant signs.
pub fn headline(chart: &EphemerisChart, lang: Language) -> Headline {
    Headline {
        name: chart.name.clone(),
        sun: sign_of(chart, BodyId::Sun, lang),
        moon: sign_of(chart, BodyId::Moon, lang),
        ascendant: ascendant_of(chart, lang),
    }
}

/// Every body the engine reported and all house cusps, plus headline strings.
/// An unreadable body becomes an inline marker; the rest are still reported.
pub fn aggregate(chart: &EphemerisChart, lang: Language) -> PlacementReport {
    let mut planets = Keyed::new();
    for body in BodyId::ALL {
        let Some(source) = chart.bodies.get(&body) else {
            continue;
        };
        let report = match normalize_placement(source) {
            Some(placement) => BodyReport::Placement(body_entry(body, &placement, lang)),
            None => {
                log::warn!("Unreadable {} placement for {}: {}", body.name(), chart.name, source_summary(source));
                BodyReport::Unreadable {
                    error: lang.unreadable_body(body),
                }
            }
        };
        planets.push(body.key(), report);
    }

    let mut houses = Keyed::new();
    for (key, cusp) in HOUSE_KEYS.iter().zip(chart.houses.iter()) {
        houses.push(*key, house_entry(cusp, lang));
    }

    let sign_for = |key: &str| {
        planets
            .get(key)
            .and_then(BodyReport::placement)
            .map(|entry| entry.sign.clone())
            .unwrap_or_else(|| lang.unknown().to_string())
    };
    let sun = sign_for("sun");
    let moon = sign_for("moon");
    let ascendant = houses
        .get("first_house")
        .map(|h| h.sign.clone())
        .unwrap_or_else(|| lang.unknown().to_string());

    let interpretations = Interpretations {
        sun_sign: lang.sun_sign_headline(&sun),
        moon_sign: lang.moon_sign_headline(&moon),
        ascendant: lang.ascendant_headline(&ascendant),
        dominant_element: lang.dominant_element_placeholder().to_string(),
        personality_summary: lang.personality_summary(&sun, &moon),
    };

    PlacementReport {
        planets,
        houses,
        interpretations,
    }
}

/// Themed readings for the interpretations endpoint.
pub fn detailed_interpretations(chart: &EphemerisChart, lang: Language) -> DetailedInterpretations {
    let phrases = lang.detailed();
    let body = |id: BodyId| sign_of(chart, id, lang);

    DetailedInterpretations {
        personality: PersonalityReading {
            sun_sign: fill(phrases.sun, &body(BodyId::Sun)),
            moon_sign: fill(phrases.moon, &body(BodyId::Moon)),
            ascendant: fill(phrases.ascendant, &ascendant_of(chart, lang)),
            dominant_element: phrases.dominant_element.to_string(),
        },
        career: CareerReading {
            tenth_house: fill(phrases.tenth_house, &house_sign(chart, 9, lang)),
            saturn: fill(phrases.saturn, &body(BodyId::Saturn)),
        },
        relationships: RelationshipReading {
            seventh_house: fill(phrases.seventh_house, &house_sign(chart, 6, lang)),
            venus: fill(phrases.venus, &body(BodyId::Venus)),
        },
        spirituality: SpiritualityReading {
            ninth_house: fill(phrases.ninth_house, &house_sign(chart, 8, lang)),
            jupiter: fill(phrases.jupiter, &body(BodyId::Jupiter)),
        },
    }
}

fn source_summary(source: &PlacementSource) -> String {
    match source {
        PlacementSource::RawAttributeBag(Value::String(message)) => message.clone(),
        PlacementSource::RawAttributeBag(other) => other.to_string(),
        PlacementSource::Structured(_) => "structured".to_string(),
    }
}
