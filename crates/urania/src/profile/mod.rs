pub mod fingerprint;
pub mod normalizer;
pub mod types;

pub use fingerprint::Fingerprint;
pub use normalizer::normalize;
pub use types::{BirthProfile, RawBirthData, ZodiacType};
