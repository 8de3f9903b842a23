pub mod error;
mod header;
pub mod loader;
pub mod report;
mod section;
mod table;

pub use error::{ParseError, ReportError};
pub use loader::load_report;
pub use report::parse_report;
