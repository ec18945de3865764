//! Localized report fragments built from engine placements.

pub mod aggregator;
pub mod labels;
pub mod types;

pub use aggregator::{aggregate, ascendant_of, detailed_interpretations, headline, normalize_placement, sign_of};
pub use labels::Language;
pub use types::{
    BodyReport, DetailedInterpretations, Headline, HouseEntry, Interpretations, Keyed, PlacementEntry,
    PlacementReport,
};
