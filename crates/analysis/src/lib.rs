pub mod aggregate;
pub mod comparison;
pub mod compliance;
pub mod error;
pub mod grouping;
pub mod lookup;
pub mod runner;
pub mod stats;
pub mod summary;

pub use aggregate::Aggregate;
pub use comparison::Comparisons;
pub use compliance::{evaluate, Compliance};
pub use error::AnalysisError;
pub use lookup::EpsilonMatrix;
pub use runner::{parse_batch, ParsedBatch};
pub use summary::{summarize, summarize_result};
