use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::epsilon::Epsilon;
use crate::schema::ReportSchema;

// Renderer defaults
pub const FIGURE_WIDTH: f64 = 14.0;
pub const FIGURE_HEIGHT: f64 = 10.0;
pub const DPI: u32 = 300;
pub const FONT_SIZE: f64 = 10.0;
pub const HISTOGRAM_BINS: usize = 20;
pub const HEADER_COLOR: &str = "#4472C4";
pub const COMPLIANT_COLOR: &str = "#90EE90";
pub const VIOLATION_COLOR: &str = "#FFB6C1";
pub const LIMIT_LINE_STYLE: &str = "--";

// Batch defaults
pub const MAX_DEFAULT_WORKERS: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid report schema: {0}")]
    Schema(String),
}

/// Style handed to the chart renderer alongside the comparison data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub figure_width: f64,
    pub figure_height: f64,
    pub dpi: u32,
    pub font_size: f64,
    pub histogram_bins: usize,
    pub header_color: String,
    pub compliant_color: String,
    pub violation_color: String,
    pub limit_line_style: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            figure_width: FIGURE_WIDTH,
            figure_height: FIGURE_HEIGHT,
            dpi: DPI,
            font_size: FONT_SIZE,
            histogram_bins: HISTOGRAM_BINS,
            header_color: HEADER_COLOR.to_string(),
            compliant_color: COMPLIANT_COLOR.to_string(),
            violation_color: VIOLATION_COLOR.to_string(),
            limit_line_style: LIMIT_LINE_STYLE.to_string(),
        }
    }
}

/// Everything a batch run needs besides its input files.
///
/// `epsilons` is the declared ε set for the fixed-ε comparison; when empty the
/// set is discovered from the parsed batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub schema: ReportSchema,
    pub epsilons: Vec<Epsilon>,
    pub workers: Option<usize>,
    pub render: RenderConfig,
}

impl AnalysisConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&data).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })?;
        config.schema.check().map_err(ConfigError::Schema)?;
        Ok(config)
    }

    /// Worker bound for parallel parsing: explicit value, or the pool default capped at 8.
    pub fn worker_count(&self, available: usize) -> usize {
        match self.workers {
            Some(n) if n > 0 => n,
            _ => available.clamp(1, MAX_DEFAULT_WORKERS),
        }
    }
}
