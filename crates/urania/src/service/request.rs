//! Typed request bodies. Parsing fails before any engine call is made.

use crate::error::ReportError;
use crate::placements::Language;
use crate::profile::RawBirthData;
use crate::rendering::ChartKind;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Presentation fields accepted next to birth data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Presentation {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NatalRequest {
    #[serde(flatten)]
    pub birth: RawBirthData,
    #[serde(flatten)]
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairRequest {
    #[serde(default)]
    pub person1: Option<RawBirthData>,
    #[serde(default)]
    pub person2: Option<RawBirthData>,
    #[serde(flatten)]
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitRequest {
    #[serde(default)]
    pub natal: Option<RawBirthData>,
    #[serde(default)]
    pub transit_date: Option<String>,
    #[serde(flatten)]
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartSvgRequest {
    #[serde(flatten)]
    pub birth: RawBirthData,
    #[serde(default)]
    pub chart_type: Option<String>,
    #[serde(flatten)]
    pub presentation: Presentation,
}

/// Decodes a JSON object body. Null, empty or non-object bodies are rejected.
pub fn parse_body<T: DeserializeOwned>(body: &Value) -> Result<T, ReportError> {
    match body {
        Value::Object(map) if !map.is_empty() => {
            serde_json::from_value(body.clone()).map_err(|e| ReportError::InvalidRequest(e.to_string()))
        }
        _ => Err(ReportError::InvalidRequest("JSON object body required".to_string())),
    }
}

impl PairRequest {
    pub fn people(&self) -> Result<(&RawBirthData, &RawBirthData), ReportError> {
        match (&self.person1, &self.person2) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(ReportError::InvalidRequest(
                "person1 and person2 are both required".to_string(),
            )),
        }
    }
}

impl TransitRequest {
    pub fn natal(&self) -> Result<&RawBirthData, ReportError> {
        self.natal
            .as_ref()
            .ok_or_else(|| ReportError::InvalidRequest("natal birth data is required".to_string()))
    }
}

impl ChartSvgRequest {
    pub fn kind(&self) -> Result<ChartKind, ReportError> {
        match self.chart_type.as_deref() {
            None => Ok(ChartKind::Natal),
            Some(value) => value.parse().map_err(|reason| ReportError::InvalidField {
                field: "chart_type",
                reason,
            }),
        }
    }
}

impl Presentation {
    pub fn language_or(&self, default: Language) -> Result<Language, ReportError> {
        match self.language.as_deref() {
            None => Ok(default),
            Some(code) => code.parse().map_err(|reason| ReportError::InvalidField {
                field: "language",
                reason,
            }),
        }
    }

    pub fn theme_or(&self, default: &str) -> String {
        self.theme.clone().unwrap_or_else(|| default.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn natal_body_keeps_birth_and_presentation_fields() {
        let body = json!({
            "name": "Jean", "year": 1990, "month": 6, "day": 15, "hour": 14, "minute": 30,
            "theme": "dark", "language": "EN"
        });
        let request: NatalRequest = parse_body(&body).unwrap();
        assert_eq!(request.birth.name.as_deref(), Some("Jean"));
        assert_eq!(request.presentation.theme.as_deref(), Some("dark"));
        assert_eq!(request.presentation.language_or(Language::FR).unwrap(), Language::EN);
    }

    #[test]
    fn wrong_types_are_invalid_requests() {
        let body = json!({ "name": "Jean", "year": "nineteen-ninety" });
        let err = parse_body::<NatalRequest>(&body).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRequest(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn empty_or_missing_bodies_are_rejected() {
        assert!(parse_body::<NatalRequest>(&Value::Null).is_err());
        assert!(parse_body::<NatalRequest>(&json!({})).is_err());
        assert!(parse_body::<NatalRequest>(&json!([1, 2])).is_err());
    }

    #[test]
    fn pair_requires_both_people() {
        let request: PairRequest = parse_body(&json!({ "person1": { "name": "A" } })).unwrap();
        assert!(request.people().is_err());
    }

    #[test]
    fn unknown_language_and_chart_type() {
        let request: ChartSvgRequest = parse_body(&json!({ "name": "A", "chart_type": "Radix", "language": "PT" })).unwrap();
        assert!(matches!(request.kind(), Err(ReportError::InvalidField { field: "chart_type", .. })));
        assert!(request.presentation.language_or(Language::FR).is_err());
    }
}
