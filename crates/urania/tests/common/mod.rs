#![allow(dead_code)]

use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use urania::aspects::{Aspect, AspectCalculator};
use urania::ephemeris::zodiac;
use urania::ephemeris::{BodyId, EphemerisChart, EphemerisEngine, EphemerisError, PlacementSource};
use urania::rendering::{ChartRenderer, RenderError, RenderRequest};
use urania::{AstroService, BirthProfile};

/// Deterministic engine: every body sits at a fixed offset from a seed derived
/// from the birth data.
#[derive(Default)]
pub struct ScriptedEngine {
    calls: AtomicUsize,
    natal_calls: AtomicUsize,
    synastry: Option<Vec<Aspect>>,
    unreadable: Vec<(BodyId, Value)>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_synastry_aspects(mut self, aspects: Vec<Aspect>) -> Self {
        self.synastry = Some(aspects);
        self
    }

    pub fn with_raw_body(mut self, body: BodyId, raw: Value) -> Self {
        self.unreadable.push((body, raw));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn natal_calls(&self) -> usize {
        self.natal_calls.load(Ordering::SeqCst)
    }

    fn chart(&self, name: &str, seed: f64) -> EphemerisChart {
        let cusps: Vec<f64> = (0..12).map(|i| zodiac::normalize_longitude(seed / 2.0 + i as f64 * 30.0)).collect();
        let mut bodies = BTreeMap::new();
        for (i, body) in BodyId::ALL.iter().enumerate() {
            let lon = zodiac::normalize_longitude(seed + i as f64 * 27.0);
            let speed = if i % 5 == 4 { -0.1 } else { 0.5 };
            bodies.insert(*body, PlacementSource::Structured(zodiac::placement_from_longitude(lon, speed, &cusps)));
        }
        for (body, raw) in &self.unreadable {
            bodies.insert(*body, PlacementSource::RawAttributeBag(raw.clone()));
        }
        EphemerisChart {
            name: name.to_string(),
            lng: 2.3522,
            lat: 48.8566,
            tz_str: "+01:00".to_string(),
            zodiac_type: Default::default(),
            bodies,
            houses: cusps.iter().map(|c| zodiac::cusp_from_longitude(*c)).collect(),
        }
    }
}

fn seed(profile: &BirthProfile) -> f64 {
    (profile.day() * 11 + profile.month() * 3 + profile.hour()) as f64 + profile.minute() as f64 / 60.0
}

impl EphemerisEngine for ScriptedEngine {
    fn natal_chart(&self, profile: &BirthProfile) -> Result<EphemerisChart, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.natal_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.chart(profile.name(), seed(profile)))
    }

    fn composite_chart(&self, first: &BirthProfile, second: &BirthProfile) -> Result<EphemerisChart, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = format!("{} & {}", first.name(), second.name());
        Ok(self.chart(&name, zodiac::midpoint(seed(first), seed(second))))
    }

    fn natal_aspects(&self, chart: &EphemerisChart) -> Result<Vec<Aspect>, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AspectCalculator::new().within_chart(chart))
    }

    fn synastry_aspects(&self, first: &EphemerisChart, second: &EphemerisChart) -> Result<Vec<Aspect>, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(match &self.synastry {
            Some(aspects) => aspects.clone(),
            None => AspectCalculator::new().between_charts(first, second),
        })
    }
}

/// Engine that always fails.
pub struct DownEngine;

impl EphemerisEngine for DownEngine {
    fn natal_chart(&self, profile: &BirthProfile) -> Result<EphemerisChart, EphemerisError> {
        Err(EphemerisError::LocationUnresolved {
            city: profile.city().to_string(),
            nation: profile.nation().to_string(),
        })
    }

    fn composite_chart(&self, _: &BirthProfile, _: &BirthProfile) -> Result<EphemerisChart, EphemerisError> {
        Err(EphemerisError::HouseCalculationFailed { message: "down".into() })
    }

    fn natal_aspects(&self, _: &EphemerisChart) -> Result<Vec<Aspect>, EphemerisError> {
        Ok(Vec::new())
    }

    fn synastry_aspects(&self, _: &EphemerisChart, _: &EphemerisChart) -> Result<Vec<Aspect>, EphemerisError> {
        Ok(Vec::new())
    }
}

/// Writes a tiny SVG naming the subject.
#[derive(Default)]
pub struct OkRenderer {
    pub calls: AtomicUsize,
}

impl ChartRenderer for OkRenderer {
    fn render(&self, request: &RenderRequest<'_>, dir: &Path) -> Result<(), RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        fs::write(
            dir.join(request.file_name()),
            format!("<svg><title>{} {}</title></svg>", request.kind, request.subject),
        )?;
        Ok(())
    }
}

pub struct FailingRenderer;

impl ChartRenderer for FailingRenderer {
    fn render(&self, _: &RenderRequest<'_>, _: &Path) -> Result<(), RenderError> {
        Err(RenderError::Failed("font cache unavailable".into()))
    }
}

/// Reports success without writing anything.
pub struct NoFileRenderer;

impl ChartRenderer for NoFileRenderer {
    fn render(&self, _: &RenderRequest<'_>, _: &Path) -> Result<(), RenderError> {
        Ok(())
    }
}

pub fn service(engine: Arc<ScriptedEngine>, renderer: Arc<dyn ChartRenderer>) -> AstroService {
    AstroService::new(engine, renderer)
}

pub fn jean() -> Value {
    json!({
        "name": "Jean Dupont", "year": 1990, "month": 6, "day": 15,
        "hour": 14, "minute": 30, "city": "Paris", "nation": "FR"
    })
}

pub fn marie() -> Value {
    json!({
        "name": "Marie Curie", "year": 1867, "month": 11, "day": 7,
        "hour": 9, "minute": 5, "city": "Paris", "nation": "FR"
    })
}
