use anyhow::Context;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use urania::{ApiResponse, ReportError};

/// Reads one request body. `-` is stdin.
pub fn read_body(path: &Path) -> anyhow::Result<Value> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read request from stdin")?;
        text
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// Body of the request, or the rejected envelope reported in its place.
pub fn load_request(path: &Path) -> Result<Value, ApiResponse> {
    read_body(path).map_err(|e| {
        log::warn!("Skipping {}: {:#}", path.display(), e);
        ApiResponse::failure(&ReportError::InvalidRequest(format!("{:#}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jean.json");
        fs::write(&path, r#"{"name": "Jean Dupont"}"#).unwrap();
        assert_eq!(load_request(&path).unwrap()["name"], "Jean Dupont");
    }

    #[test]
    fn malformed_file_becomes_client_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ name: ").unwrap();

        let response = load_request(&path).unwrap_err();
        assert!(!response.success);
        assert_eq!(response.status, 400);
        assert!(response.error.unwrap().contains("broken.json is not valid JSON"));
    }

    #[test]
    fn missing_file_becomes_client_error() {
        let dir = tempfile::tempdir().unwrap();
        let response = load_request(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(response.status, 400);
        assert!(response.error.unwrap().contains("absent.json"));
    }
}
