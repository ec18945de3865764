//! Transport-agnostic request handling: JSON body in, response envelope out.

pub mod envelope;
pub mod reports;
pub mod request;

pub use envelope::ApiResponse;
pub use reports::{BasicInfo, ChartSvgReport, Coordinates, InterpretationsReport, NatalReport};

use crate::cache::ChartCache;
use crate::chart::{self, CompositeReport, SynastryReport, TransitReport};
use crate::ephemeris::{EphemerisChart, EphemerisEngine, SwissEphemerisAdapter};
use crate::error::ReportError;
use crate::placements::{aggregate, detailed_interpretations, Language};
use crate::profile::{normalize, BirthProfile};
use crate::rendering::{ArtifactRetriever, ChartKind, ChartRenderer, RenderOptions, RenderRequest, SvgChartRenderer};
use anyhow::Context;
use request::{parse_body, ChartSvgRequest, NatalRequest, PairRequest, Presentation, TransitRequest};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use urania_config::ServiceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Natal,
    Synastry,
    Composite,
    Transit,
    ChartSvg,
    Interpretations,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::Natal,
        Endpoint::Synastry,
        Endpoint::Composite,
        Endpoint::Transit,
        Endpoint::ChartSvg,
        Endpoint::Interpretations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Natal => "natal",
            Endpoint::Synastry => "synastry",
            Endpoint::Composite => "composite",
            Endpoint::Transit => "transit",
            Endpoint::ChartSvg => "chart-svg",
            Endpoint::Interpretations => "interpretations",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Endpoint::ALL
            .into_iter()
            .find(|e| e.as_str() == wanted)
            .ok_or_else(|| format!("unknown endpoint {s:?}"))
    }
}

/// Request handler shared by every caller. Cheap to share behind an `Arc`;
/// all methods take `&self`.
pub struct AstroService {
    engine: Arc<dyn EphemerisEngine>,
    renderer: Arc<dyn ChartRenderer>,
    cache: Arc<ChartCache>,
    artifacts: ArtifactRetriever,
    default_language: Language,
    default_theme: String,
}

impl AstroService {
    pub fn new(engine: Arc<dyn EphemerisEngine>, renderer: Arc<dyn ChartRenderer>) -> Self {
        Self {
            artifacts: ArtifactRetriever::new(Arc::clone(&renderer), None),
            engine,
            renderer,
            cache: Arc::new(ChartCache::unbounded()),
            default_language: Language::default(),
            default_theme: "classic".to_string(),
        }
    }

    pub fn with_cache(mut self, cache: Arc<ChartCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Parent directory for per-request chart storage.
    pub fn with_chart_dir(mut self, chart_dir: Option<PathBuf>) -> Self {
        self.artifacts = ArtifactRetriever::new(Arc::clone(&self.renderer), chart_dir);
        self
    }

    pub fn with_defaults(mut self, language: Language, theme: impl Into<String>) -> Self {
        self.default_language = language;
        self.default_theme = theme.into();
        self
    }

    /// Swiss Ephemeris engine and SVG renderer configured from `config`.
    pub fn from_config(config: &ServiceConfig) -> anyhow::Result<Self> {
        let language: Language = config
            .default_language
            .parse()
            .map_err(anyhow::Error::msg)
            .context("invalid default_language")?;
        let engine = SwissEphemerisAdapter::new(config.ephemeris_path.clone(), config.locations.clone())
            .context("failed to initialise Swiss Ephemeris")?;
        log::info!("Swiss Ephemeris data from {}", engine.ephemeris_path().display());
        let cache = match config.cache_capacity {
            Some(capacity) => ChartCache::with_capacity(capacity),
            None => ChartCache::unbounded(),
        };

        Ok(Self::new(Arc::new(engine), Arc::new(SvgChartRenderer::new()))
            .with_cache(Arc::new(cache))
            .with_chart_dir(config.chart_dir.clone())
            .with_defaults(language, config.default_theme.clone()))
    }

    pub fn cache(&self) -> &ChartCache {
        &self.cache
    }

    /// Runs one request. Failures become unsuccessful envelopes; nothing panics
    /// out of here.
    pub fn handle(&self, endpoint: Endpoint, body: &Value) -> ApiResponse {
        log::info!("Handling {} request", endpoint);
        let response = match endpoint {
            Endpoint::Natal => ApiResponse::from_report(self.natal(body)),
            Endpoint::Synastry => ApiResponse::from_report(self.synastry(body)),
            Endpoint::Composite => ApiResponse::from_report(self.composite(body)),
            Endpoint::Transit => ApiResponse::from_report(self.transit(body)),
            Endpoint::ChartSvg => ApiResponse::from_report(self.chart_svg(body)),
            Endpoint::Interpretations => ApiResponse::from_report(self.interpretations(body)),
        };
        if let Some(error) = &response.error {
            if response.status >= 500 {
                log::error!("{} request failed ({}): {}", endpoint, response.status, error);
            } else {
                log::warn!("{} request rejected ({}): {}", endpoint, response.status, error);
            }
        }
        response
    }

    fn render_options(&self, presentation: &Presentation) -> Result<RenderOptions, ReportError> {
        Ok(RenderOptions {
            theme: presentation.theme_or(&self.default_theme),
            language: presentation.language_or(self.default_language)?,
        })
    }

    fn natal_chart(&self, profile: &BirthProfile) -> Result<Arc<EphemerisChart>, ReportError> {
        self.cache
            .get_or_try_insert(profile, || self.engine.natal_chart(profile))
            .map_err(ReportError::from)
    }

    pub fn natal(&self, body: &Value) -> Result<NatalReport, ReportError> {
        let request: NatalRequest = parse_body(body)?;
        let profile = normalize(&request.birth)?;
        let options = self.render_options(&request.presentation)?;
        let lang = options.language;

        let chart = self.natal_chart(&profile)?;
        let aspects = self.engine.natal_aspects(&chart)?;
        let placements = aggregate(&chart, lang);
        let raw_data = serde_json::to_value(chart.as_ref())
            .map_err(|e| ReportError::UpstreamComputationFailure(e.to_string()))?;

        let svg = self.artifacts.retrieve(&RenderRequest {
            kind: ChartKind::Natal,
            subject: profile.name().to_string(),
            primary: &chart,
            secondary: None,
            aspects: &aspects,
            options,
        });

        Ok(NatalReport {
            basic_info: BasicInfo {
                name: profile.name().to_string(),
                birth_date: profile.birth_date_label(),
                birth_time: profile.birth_time_label(),
                location: profile.location_label(),
                coordinates: Coordinates {
                    longitude: chart.lng,
                    latitude: chart.lat,
                },
            },
            planets: placements.planets,
            houses: placements.houses,
            aspects,
            interpretations: placements.interpretations,
            raw_data,
            svg,
        })
    }

    pub fn synastry(&self, body: &Value) -> Result<SynastryReport, ReportError> {
        let request: PairRequest = parse_body(body)?;
        let (first, second) = request.people()?;
        let first = normalize(first)?;
        let second = normalize(second)?;
        let options = self.render_options(&request.presentation)?;

        let first_chart = self.natal_chart(&first)?;
        let second_chart = self.natal_chart(&second)?;
        chart::synastry(self.engine.as_ref(), &first_chart, &second_chart, &self.artifacts, options)
    }

    pub fn composite(&self, body: &Value) -> Result<CompositeReport, ReportError> {
        let request: PairRequest = parse_body(body)?;
        let (first, second) = request.people()?;
        let first = normalize(first)?;
        let second = normalize(second)?;
        let options = self.render_options(&request.presentation)?;

        chart::composite(self.engine.as_ref(), &first, &second, &self.artifacts, options)
    }

    pub fn transit(&self, body: &Value) -> Result<TransitReport, ReportError> {
        let request: TransitRequest = parse_body(body)?;
        let natal = normalize(request.natal()?)?;
        let instant = chart::resolve_transit_instant(request.transit_date.as_deref())?;
        let transit_profile = chart::transit_profile(&natal, instant)?;
        let options = self.render_options(&request.presentation)?;

        let natal_chart = self.natal_chart(&natal)?;
        chart::transit(
            self.engine.as_ref(),
            &natal_chart,
            &transit_profile,
            instant,
            &self.artifacts,
            options,
        )
    }

    /// The image is the whole payload here, so a rendering failure fails the request.
    pub fn chart_svg(&self, body: &Value) -> Result<ChartSvgReport, ReportError> {
        let request: ChartSvgRequest = parse_body(body)?;
        let profile = normalize(&request.birth)?;
        let kind = request.kind()?;
        let options = self.render_options(&request.presentation)?;

        let chart = self.natal_chart(&profile)?;
        let aspects = self.engine.natal_aspects(&chart)?;
        let rendered = self
            .artifacts
            .fetch(&RenderRequest {
                kind,
                subject: profile.name().to_string(),
                primary: &chart,
                secondary: None,
                aspects: &aspects,
                options,
            })
            .map_err(|e| ReportError::UpstreamComputationFailure(e.to_string()))?;

        Ok(ChartSvgReport {
            svg_base64: rendered.encoded(),
            filename: rendered.filename,
        })
    }

    pub fn interpretations(&self, body: &Value) -> Result<InterpretationsReport, ReportError> {
        let request: NatalRequest = parse_body(body)?;
        let profile = normalize(&request.birth)?;
        let lang = request.presentation.language_or(self.default_language)?;

        let chart = self.natal_chart(&profile)?;
        Ok(InterpretationsReport {
            name: profile.name().to_string(),
            interpretations: detailed_interpretations(&chart, lang),
        })
    }
}
