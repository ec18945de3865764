use crate::aspects::{display_aspects, score_aspects, Aspect, CompatibilityResult};
use crate::ephemeris::{EphemerisChart, EphemerisEngine};
use crate::error::ReportError;
use crate::placements::{headline, Headline};
use crate::rendering::{ArtifactRetriever, ChartArtifact, ChartKind, RenderOptions, RenderRequest};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SynastryReport {
    pub person1: Headline,
    pub person2: Headline,
    pub compatibility: CompatibilityResult,
    /// Leading aspects only; compatibility covers the full list.
    pub aspects: Vec<Aspect>,
    pub interpretation: String,
    pub svg: ChartArtifact,
}

/// Scores every cross-chart aspect between two natal charts.
pub fn synastry(
    engine: &dyn EphemerisEngine,
    first: &EphemerisChart,
    second: &EphemerisChart,
    artifacts: &ArtifactRetriever,
    options: RenderOptions,
) -> Result<SynastryReport, ReportError> {
    let lang = options.language;
    let aspects = engine.synastry_aspects(first, second)?;
    let compatibility = score_aspects(&aspects);
    log::debug!(
        "Synastry {} / {}: {} aspects, score {}",
        first.name,
        second.name,
        aspects.len(),
        compatibility.score
    );

    let svg = artifacts.retrieve(&RenderRequest {
        kind: ChartKind::Synastry,
        subject: first.name.clone(),
        primary: first,
        secondary: Some(second),
        aspects: &aspects,
        options,
    });

    Ok(SynastryReport {
        person1: headline(first, lang),
        person2: headline(second, lang),
        compatibility,
        aspects: display_aspects(&aspects).to_vec(),
        interpretation: lang.synastry_summary(&first.name, &second.name),
        svg,
    })
}
