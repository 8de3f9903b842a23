pub mod config;
pub mod epsilon;
pub mod record;
pub mod result;
pub mod schema;

pub use config::{AnalysisConfig, ConfigError, RenderConfig};
pub use epsilon::Epsilon;
pub use record::{ExperimentResult, QuantileSample, RankSample, TableKind};
pub use result::SummaryRow;
pub use schema::{QuantileColumns, RankColumns, ReportSchema};
