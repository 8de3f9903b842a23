use std::path::Path;

use mrl_eval_shared::{ExperimentResult, ReportSchema};

use crate::error::{ParseError, ReportError};
use crate::report::parse_report;

/// Reads and parses one report file. Failures carry the file path.
pub fn load_report(path: &Path, schema: &ReportSchema) -> Result<ExperimentResult, ReportError> {
    let wrap = |source: ParseError| ReportError {
        path: path.to_path_buf(),
        source,
    };

    let text = std::fs::read_to_string(path).map_err(|e| wrap(ParseError::Io(e)))?;
    let result = parse_report(&text, schema).map_err(wrap)?;

    log::debug!(
        "parsed {}: dataset={} n={} epsilon={} rank_rows={} quantile_rows={}",
        path.display(),
        result.dataset,
        result.n,
        result.epsilon,
        result.rank_table.len(),
        result.quantile_table.len(),
    );
    Ok(result)
}
