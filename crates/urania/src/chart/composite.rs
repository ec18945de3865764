use crate::ephemeris::EphemerisEngine;
use crate::error::ReportError;
use crate::placements::{headline, Headline};
use crate::profile::BirthProfile;
use crate::rendering::{ArtifactRetriever, ChartArtifact, ChartKind, RenderOptions, RenderRequest};
use serde::Serialize;

/// Headline placements of the midpoint chart only.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeReport {
    pub person1: String,
    pub person2: String,
    pub composite: Headline,
    pub interpretation: String,
    pub svg: ChartArtifact,
}

pub fn composite(
    engine: &dyn EphemerisEngine,
    first: &BirthProfile,
    second: &BirthProfile,
    artifacts: &ArtifactRetriever,
    options: RenderOptions,
) -> Result<CompositeReport, ReportError> {
    let lang = options.language;
    let chart = engine.composite_chart(first, second)?;

    let aspects = engine.natal_aspects(&chart).unwrap_or_else(|e| {
        log::warn!("Composite aspects unavailable for {}: {}", chart.name, e);
        Vec::new()
    });
    let svg = artifacts.retrieve(&RenderRequest {
        kind: ChartKind::Composite,
        subject: chart.name.clone(),
        primary: &chart,
        secondary: None,
        aspects: &aspects,
        options,
    });

    Ok(CompositeReport {
        person1: first.name().to_string(),
        person2: second.name().to_string(),
        composite: headline(&chart, lang),
        interpretation: lang.composite_summary(first.name(), second.name()),
        svg,
    })
}
