//! Chart image retrieval. Each request renders into its own temporary
//! directory, reads the expected file back and encodes it.

use crate::rendering::renderer::{ChartRenderer, RenderError, RenderRequest};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Rendered chart, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartArtifact {
    pub generated: bool,
    pub filename: Option<String>,
    pub base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChartArtifact {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            generated: false,
            filename: None,
            base64: None,
            error: Some(error.into()),
        }
    }
}

/// Why no image could be produced.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Could not prepare chart storage: {0}")]
    Storage(std::io::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Chart file {filename} was not produced")]
    Missing { filename: String },
    #[error("Could not read chart file {filename}: {source}")]
    Read {
        filename: String,
        source: std::io::Error,
    },
}

/// Rendered bytes, not yet encoded.
#[derive(Debug, Clone)]
pub struct RenderedChart {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl RenderedChart {
    pub fn encoded(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Runs the renderer in scoped temporary storage.
#[derive(Clone)]
pub struct ArtifactRetriever {
    renderer: Arc<dyn ChartRenderer>,
    storage_root: Option<PathBuf>,
}

impl ArtifactRetriever {
    /// `storage_root` is the parent of per-request directories; the system temp
    /// directory when `None`.
    pub fn new(renderer: Arc<dyn ChartRenderer>, storage_root: Option<PathBuf>) -> Self {
        Self { renderer, storage_root }
    }

    /// Render and read back. The temporary directory is removed on return.
    pub fn fetch(&self, request: &RenderRequest<'_>) -> Result<RenderedChart, ArtifactError> {
        let builder = {
            let mut b = tempfile::Builder::new();
            b.prefix("urania-chart-");
            b
        };
        let scratch = match &self.storage_root {
            Some(root) => {
                fs::create_dir_all(root).map_err(ArtifactError::Storage)?;
                builder.tempdir_in(root)
            }
            None => builder.tempdir(),
        }
        .map_err(ArtifactError::Storage)?;

        self.renderer.render(request, scratch.path())?;

        let filename = request.file_name();
        let path = scratch.path().join(&filename);
        if !path.is_file() {
            return Err(ArtifactError::Missing { filename });
        }
        let bytes = fs::read(&path).map_err(|source| ArtifactError::Read {
            filename: filename.clone(),
            source,
        })?;
        log::debug!("Read {} bytes of {}", bytes.len(), path.display());
        Ok(RenderedChart { filename, bytes })
    }

    /// Never fails: problems are reported inside the artifact.
    pub fn retrieve(&self, request: &RenderRequest<'_>) -> ChartArtifact {
        match self.fetch(request) {
            Ok(chart) => ChartArtifact {
                generated: true,
                base64: Some(chart.encoded()),
                filename: Some(chart.filename),
                error: None,
            },
            Err(e) => {
                log::warn!("Chart generation failed for {}: {}", request.subject, e);
                ChartArtifact::failed(e.to_string())
            }
        }
    }
}
