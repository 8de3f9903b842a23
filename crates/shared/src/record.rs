use std::fmt;

use serde::Serialize;

use crate::epsilon::Epsilon;

/// One row of the RANK evaluation table.
#[derive(Debug, Clone, PartialEq)]
pub struct RankSample {
    pub value: f64,
    pub rank_real: i64,
    pub rank_estimated: i64,
    pub error_absolute: f64,
    pub error_normalized: f64,
}

/// One row of the QUANTILE evaluation table. Errors are measured in rank space.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileSample {
    pub phi: f64,
    pub quantile_real: f64,
    pub quantile_estimated: f64,
    pub error_rank_abs: f64,
    pub error_rank_norm: f64,
}

/// Which of the two measurement tables a value or error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Rank,
    Quantile,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Rank => f.write_str("RANK"),
            TableKind::Quantile => f.write_str("QUANTILE"),
        }
    }
}

/// A parsed report: run metadata plus both measurement tables.
///
/// The parser guarantees both tables are non-empty and keeps rows in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentResult {
    pub dataset: String,
    pub n: u64,
    pub epsilon: Epsilon,
    pub rank_table: Vec<RankSample>,
    pub quantile_table: Vec<QuantileSample>,
}

impl ExperimentResult {
    pub fn expected_error(&self) -> f64 {
        self.epsilon.absolute_bound(self.n)
    }

    pub fn rank_errors_normalized(&self) -> impl Iterator<Item = f64> + '_ {
        self.rank_table.iter().map(|r| r.error_normalized)
    }

    pub fn quantile_errors_normalized(&self) -> impl Iterator<Item = f64> + '_ {
        self.quantile_table.iter().map(|q| q.error_rank_norm)
    }

    pub fn errors_normalized(&self, table: TableKind) -> Vec<f64> {
        match table {
            TableKind::Rank => self.rank_errors_normalized().collect(),
            TableKind::Quantile => self.quantile_errors_normalized().collect(),
        }
    }
}
