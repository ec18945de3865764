use crate::aspects::Aspect;
use crate::ephemeris::EphemerisChart;
use crate::placements::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Chart types the renderer can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Natal,
    Synastry,
    Transit,
    Composite,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChartKind::Natal => "Natal",
            ChartKind::Synastry => "Synastry",
            ChartKind::Transit => "Transit",
            ChartKind::Composite => "Composite",
        };
        f.write_str(label)
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "natal" => Ok(ChartKind::Natal),
            "synastry" => Ok(ChartKind::Synastry),
            "transit" => Ok(ChartKind::Transit),
            "composite" => Ok(ChartKind::Composite),
            other => Err(format!("unknown chart type {other:?}")),
        }
    }
}

/// Presentation options forwarded from the request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub theme: String,
    pub language: Language,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: "classic".to_string(),
            language: Language::default(),
        }
    }
}

/// Everything needed to draw one chart. `secondary` is the outer wheel of
/// synastry and transit charts.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    pub kind: ChartKind,
    /// Subject name used for the title and the file name.
    pub subject: String,
    pub primary: &'a EphemerisChart,
    pub secondary: Option<&'a EphemerisChart>,
    pub aspects: &'a [Aspect],
    pub options: RenderOptions,
}

impl RenderRequest<'_> {
    pub fn file_name(&self) -> String {
        chart_file_name(&self.subject, self.kind)
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart for {subject} has no drawable bodies")]
    EmptyChart { subject: String },
    #[error("{kind} chart requires a second chart")]
    MissingSecondary { kind: ChartKind },
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
    #[error("Renderer failed: {0}")]
    Failed(String),
}

/// Draws a chart image into a directory. Implementations must write the file
/// named by [`RenderRequest::file_name`]; the caller reads it back from there.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, request: &RenderRequest<'_>, output_dir: &Path) -> Result<(), RenderError>;
}

/// "<name> - <Kind> Chart.svg", with path separators and control characters
/// in the name replaced.
pub fn chart_file_name(subject: &str, kind: ChartKind) -> String {
    let safe: String = subject
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_control() { '_' } else { c })
        .collect();
    format!("{} - {} Chart.svg", safe.trim(), kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_subject_and_kind() {
        assert_eq!(chart_file_name("Jean Dupont", ChartKind::Natal), "Jean Dupont - Natal Chart.svg");
        assert_eq!(chart_file_name("A & B", ChartKind::Composite), "A & B - Composite Chart.svg");
        assert_eq!(chart_file_name("../etc/x", ChartKind::Transit), ".._etc_x - Transit Chart.svg");
    }

    #[test]
    fn chart_kind_parses_case_insensitively() {
        assert_eq!("SYNASTRY".parse::<ChartKind>().unwrap(), ChartKind::Synastry);
        assert!("radix".parse::<ChartKind>().is_err());
    }
}
