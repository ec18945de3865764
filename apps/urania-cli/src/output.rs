use anyhow::Context;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use urania::ApiResponse;

pub fn render_envelope(response: &ApiResponse, pretty: bool) -> anyhow::Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    text.context("Failed to serialize response")
}

/// (filename, base64) pairs carried by a response payload. Report endpoints
/// nest them under `svg`; the chart-svg endpoint returns them at top level.
fn embedded_charts(data: &Value) -> Vec<(&str, &str)> {
    let nested = data
        .get("svg")
        .and_then(|svg| Some((svg.get("filename")?.as_str()?, svg.get("base64")?.as_str()?)));
    let top = data
        .get("filename")
        .and_then(Value::as_str)
        .zip(data.get("svg_base64").and_then(Value::as_str));
    nested.into_iter().chain(top).collect()
}

/// Decodes every chart image in the response into `dir`.
pub fn save_charts(response: &ApiResponse, dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let Some(data) = &response.data else {
        return Ok(Vec::new());
    };
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::new();
    for (filename, encoded) in embedded_charts(data) {
        let bytes = STANDARD
            .decode(encoded)
            .with_context(|| format!("Chart {filename} is not valid base64"))?;
        let path = dir.join(filename);
        fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(data: Value) -> ApiResponse {
        ApiResponse::ok(data)
    }

    #[test]
    fn saves_nested_and_top_level_charts() {
        let dir = tempfile::tempdir().unwrap();

        let natal = response(json!({
            "svg": { "generated": true, "filename": "Jean - Natal Chart.svg", "base64": "PHN2Zy8+" }
        }));
        let written = save_charts(&natal, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("Jean - Natal Chart.svg")]);
        assert_eq!(fs::read_to_string(&written[0]).unwrap(), "<svg/>");

        let chart = response(json!({ "filename": "Jean - Transit Chart.svg", "svg_base64": "PHN2Zy8+" }));
        assert_eq!(save_charts(&chart, dir.path()).unwrap().len(), 1);
    }

    #[test]
    fn failed_artifact_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let natal = response(json!({
            "svg": { "generated": false, "filename": null, "base64": null, "error": "boom" }
        }));
        assert!(save_charts(&natal, dir.path()).unwrap().is_empty());
    }

    #[test]
    fn pretty_output_is_multiline() {
        let envelope = response(json!({ "name": "Jean" }));
        assert!(render_envelope(&envelope, true).unwrap().contains('\n'));
        assert!(!render_envelope(&envelope, false).unwrap().contains('\n'));
    }
}
