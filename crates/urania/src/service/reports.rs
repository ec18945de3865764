use crate::aspects::Aspect;
use crate::placements::{BodyReport, DetailedInterpretations, HouseEntry, Interpretations, Keyed};
use crate::rendering::ChartArtifact;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BasicInfo {
    pub name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub location: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, Serialize)]
pub struct NatalReport {
    pub basic_info: BasicInfo,
    pub planets: Keyed<BodyReport>,
    pub houses: Keyed<HouseEntry>,
    pub aspects: Vec<Aspect>,
    pub interpretations: Interpretations,
    pub raw_data: Value,
    pub svg: ChartArtifact,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartSvgReport {
    pub filename: String,
    pub svg_base64: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterpretationsReport {
    pub name: String,
    pub interpretations: DetailedInterpretations,
}
