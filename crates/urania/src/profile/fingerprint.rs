//! Deterministic memoization key for a birth profile.

use crate::profile::types::{BirthProfile, RawBirthData};
use serde::Serialize;
use std::fmt;

/// ASCII unit separator; does not occur in names typed by people.
const SEPARATOR: char = '\u{1f}';

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Identity key over name, date, time, city and nation.
    pub fn of(profile: &BirthProfile) -> Self {
        Self::join(&[
            profile.name().to_string(),
            profile.year().to_string(),
            profile.month().to_string(),
            profile.day().to_string(),
            profile.hour().to_string(),
            profile.minute().to_string(),
            profile.city().to_string(),
            profile.nation().to_string(),
        ])
    }

    /// Same key computed before normalization; absent fields contribute an empty
    /// component, so raw data that omits city/nation differs from the defaulted profile.
    pub fn from_raw(raw: &RawBirthData) -> Self {
        fn part<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }
        Self::join(&[
            part(&raw.name),
            part(&raw.year),
            part(&raw.month),
            part(&raw.day),
            part(&raw.hour),
            part(&raw.minute),
            part(&raw.city),
            part(&raw.nation),
        ])
    }

    fn join(parts: &[String]) -> Self {
        let mut key = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                key.push(SEPARATOR);
            }
            key.push_str(part);
        }
        Fingerprint(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.replace(SEPARATOR, "|"))
    }
}
