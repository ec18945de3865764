//! Two-chart derivations: synastry scoring, midpoint composites and transits.

pub mod composite;
pub mod synastry;
pub mod transit;

pub use composite::{composite, CompositeReport};
pub use synastry::{synastry, SynastryReport};
pub use transit::{
    parse_transit_instant, resolve_transit_instant, transit, transit_profile, NatalSummary, TransitPlanets,
    TransitReport,
};
