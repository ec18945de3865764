pub mod artifact;
pub mod primitives;
pub mod renderer;
pub mod svg;
pub mod visual_config;

pub use artifact::{ArtifactError, ArtifactRetriever, ChartArtifact, RenderedChart};
pub use renderer::{chart_file_name, ChartKind, ChartRenderer, RenderError, RenderOptions, RenderRequest};
pub use svg::SvgChartRenderer;
pub use visual_config::{GlyphConfig, VisualConfig};
