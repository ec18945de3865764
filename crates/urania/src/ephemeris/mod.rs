pub mod adapter;
pub mod engine;
pub mod location;
pub mod types;
pub mod zodiac;

pub use adapter::SwissEphemerisAdapter;
pub use engine::{EphemerisEngine, EphemerisError};
pub use types::{
    BodyId, EphemerisChart, HouseCusp, PlacementSource, StructuredPlacement, HOUSE_CODES, HOUSE_KEYS,
};
