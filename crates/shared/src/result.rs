use serde::Serialize;

use crate::epsilon::Epsilon;

/// Per-report summary. Field order is the column order of the summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub dataset: String,
    pub n: u64,
    pub epsilon: Epsilon,
    pub rank_max_error_norm: f64,
    pub rank_avg_error_norm: f64,
    pub rank_max_error_abs: f64,
    pub quantile_max_error_norm: f64,
    pub quantile_avg_error_norm: f64,
    pub quantile_max_error_abs: f64,
    pub rank_compliant: bool,
    pub quantile_compliant: bool,
}

impl SummaryRow {
    /// Both the rank and the quantile errors stay within ε.
    pub fn compliant(&self) -> bool {
        self.rank_compliant && self.quantile_compliant
    }
}
