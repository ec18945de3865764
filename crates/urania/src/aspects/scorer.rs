//! Compatibility scoring over a cross-chart aspect list.

use crate::aspects::types::Aspect;
use serde::{Deserialize, Serialize};

/// Number of aspects shown in a synastry report. Scoring always uses the full list.
pub const DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AspectNature {
    Favorable,
    Challenging,
    Neutral,
}

impl AspectNature {
    /// Exact, case-sensitive match against the English aspect names. Anything
    /// else, conjunctions and minor aspects included, is neutral.
    pub fn classify(aspect_type: &str) -> Self {
        match aspect_type {
            "trine" | "sextile" => AspectNature::Favorable,
            "square" | "opposition" => AspectNature::Challenging,
            _ => AspectNature::Neutral,
        }
    }

    pub fn weight(&self) -> i64 {
        match self {
            AspectNature::Favorable => 2,
            AspectNature::Challenging => -1,
            AspectNature::Neutral => 1,
        }
    }
}

/// Ordered worst to best, so `Ord` follows quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompatibilityTier {
    Difficult,
    Moderate,
    Good,
    Excellent,
}

/// Strict thresholds: 10, 5 and 0 fall to the next lower tier.
pub fn tier_for(score: i64) -> CompatibilityTier {
    if score > 10 {
        CompatibilityTier::Excellent
    } else if score > 5 {
        CompatibilityTier::Good
    } else if score > 0 {
        CompatibilityTier::Moderate
    } else {
        CompatibilityTier::Difficult
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    pub score: i64,
    pub positive_aspects: usize,
    pub challenging_aspects: usize,
    pub level: CompatibilityTier,
}

pub fn score_aspects(aspects: &[Aspect]) -> CompatibilityResult {
    let (score, positive_aspects, challenging_aspects) =
        aspects
            .iter()
            .fold((0i64, 0usize, 0usize), |(score, positive, challenging), aspect| {
                let nature = AspectNature::classify(&aspect.aspect);
                let score = score + nature.weight();
                match nature {
                    AspectNature::Favorable => (score, positive + 1, challenging),
                    AspectNature::Challenging => (score, positive, challenging + 1),
                    AspectNature::Neutral => (score, positive, challenging),
                }
            });

    CompatibilityResult {
        score,
        positive_aspects,
        challenging_aspects,
        level: tier_for(score),
    }
}

/// Leading slice shown in reports.
pub fn display_aspects(aspects: &[Aspect]) -> &[Aspect] {
    &aspects[..aspects.len().min(DISPLAY_LIMIT)]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aspects(types: &[&str]) -> Vec<Aspect> {
        types.iter().map(|t| Aspect::new("Sun", "Moon", *t)).collect()
    }

    #[test]
    fn empty_list_is_difficult() {
        let result = score_aspects(&[]);
        assert_eq!(result.score, 0);
        assert_eq!(result.positive_aspects, 0);
        assert_eq!(result.challenging_aspects, 0);
        assert_eq!(result.level, CompatibilityTier::Difficult);
    }

    #[test]
    fn weights_per_nature() {
        let result = score_aspects(&aspects(&["trine", "sextile", "square", "opposition", "conjunction", "quincunx"]));
        assert_eq!(result.score, 2 + 2 - 1 - 1 + 1 + 1);
        assert_eq!(result.positive_aspects, 2);
        assert_eq!(result.challenging_aspects, 2);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(AspectNature::classify("Trine"), AspectNature::Neutral);
        assert_eq!(AspectNature::classify("SQUARE"), AspectNature::Neutral);
        assert_eq!(AspectNature::classify("trine"), AspectNature::Favorable);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(tier_for(11), CompatibilityTier::Excellent);
        assert_eq!(tier_for(10), CompatibilityTier::Good);
        assert_eq!(tier_for(6), CompatibilityTier::Good);
        assert_eq!(tier_for(5), CompatibilityTier::Moderate);
        assert_eq!(tier_for(1), CompatibilityTier::Moderate);
        assert_eq!(tier_for(0), CompatibilityTier::Difficult);
        assert_eq!(tier_for(-7), CompatibilityTier::Difficult);
    }

    #[test]
    fn tiers_are_monotonic() {
        for s in -20..40 {
            assert!(tier_for(s) <= tier_for(s + 1));
        }
    }

    #[test]
    fn score_identity_holds() {
        let list = aspects(&["trine", "conjunction", "square", "square", "sextile", "semi-square", "opposition"]);
        let result = score_aspects(&list);
        let neutral = list.len() - result.positive_aspects - result.challenging_aspects;
        assert_eq!(
            result.score,
            2 * result.positive_aspects as i64 - result.challenging_aspects as i64 + neutral as i64
        );
    }

    #[test]
    fn truncation_does_not_affect_counts() {
        let mut types = vec!["square"; 10];
        types.extend(vec!["trine"; 5]);
        let list = aspects(&types);
        let result = score_aspects(&list);
        assert_eq!(result.challenging_aspects, 10);
        assert_eq!(result.positive_aspects, 5);
        assert_eq!(result.score, 0);
        let shown = display_aspects(&list);
        assert_eq!(shown.len(), 10);
        assert!(shown.iter().all(|a| a.aspect == "square"));
    }
}
