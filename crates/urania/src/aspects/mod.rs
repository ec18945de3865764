pub mod calculator;
pub mod scorer;
pub mod types;

pub use calculator::AspectCalculator;
pub use scorer::{display_aspects, score_aspects, tier_for, AspectNature, CompatibilityResult, CompatibilityTier, DISPLAY_LIMIT};
pub use types::Aspect;
