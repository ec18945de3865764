//! Birth-chart reports: profile normalization, localized placement reports,
//! synastry scoring, composite and transit derivations, and chart images.

pub mod aspects;
pub mod cache;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod placements;
pub mod profile;
pub mod rendering;
pub mod service;

pub use cache::ChartCache;
pub use error::ReportError;
pub use placements::Language;
pub use profile::{normalize, BirthProfile, Fingerprint, RawBirthData, ZodiacType};
pub use service::{ApiResponse, AstroService, Endpoint};
