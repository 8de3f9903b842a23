use mrl_eval_shared::{ExperimentResult, TableKind};

use crate::error::AnalysisError;
use crate::stats;

/// Whether the measured errors of one result respect its declared ε.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compliance {
    pub rank_max_error_norm: f64,
    pub quantile_max_error_norm: f64,
    pub rank_compliant: bool,
    pub quantile_compliant: bool,
}

impl Compliance {
    pub fn compliant(&self) -> bool {
        self.rank_compliant && self.quantile_compliant
    }
}

/// Compares the largest normalized error of each table against ε (non-strict).
///
/// A NaN error makes its table non-compliant.
pub fn evaluate(result: &ExperimentResult) -> Result<Compliance, AnalysisError> {
    let eps = result.epsilon.value();
    let rank_max = stats::max(result.rank_errors_normalized())
        .ok_or_else(|| empty_table(result, TableKind::Rank))?;
    let quantile_max = stats::max(result.quantile_errors_normalized())
        .ok_or_else(|| empty_table(result, TableKind::Quantile))?;

    Ok(Compliance {
        rank_max_error_norm: rank_max,
        quantile_max_error_norm: quantile_max,
        rank_compliant: rank_max <= eps,
        quantile_compliant: quantile_max <= eps,
    })
}

pub(crate) fn empty_table(result: &ExperimentResult, table: TableKind) -> AnalysisError {
    AnalysisError::EmptyTable {
        dataset: result.dataset.clone(),
        epsilon: result.epsilon,
        table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrl_eval_shared::{Epsilon, QuantileSample, RankSample};

    fn result(eps: f64, rank_errors: &[f64], quantile_errors: &[f64]) -> ExperimentResult {
        ExperimentResult {
            dataset: "chicago2015".to_string(),
            n: 1000,
            epsilon: Epsilon::new(eps).unwrap(),
            rank_table: rank_errors
                .iter()
                .map(|&e| RankSample {
                    value: 0.0,
                    rank_real: 0,
                    rank_estimated: 0,
                    error_absolute: e * 1000.0,
                    error_normalized: e,
                })
                .collect(),
            quantile_table: quantile_errors
                .iter()
                .map(|&e| QuantileSample {
                    phi: 0.5,
                    quantile_real: 0.0,
                    quantile_estimated: 0.0,
                    error_rank_abs: e * 1000.0,
                    error_rank_norm: e,
                })
                .collect(),
        }
    }

    #[test]
    fn test_boundary_is_compliant() {
        let c = evaluate(&result(0.05, &[0.01, 0.04, 0.05], &[0.05])).unwrap();
        assert!(c.rank_compliant);
        assert!(c.quantile_compliant);
        assert_eq!(c.rank_max_error_norm, 0.05);
        assert!(c.compliant());
    }

    #[test]
    fn test_above_bound_is_not_compliant() {
        let c = evaluate(&result(0.05, &[0.01], &[0.02, 0.050001])).unwrap();
        assert!(c.rank_compliant);
        assert!(!c.quantile_compliant);
        assert!(!c.compliant());
    }

    #[test]
    fn test_nan_error_is_not_compliant() {
        let c = evaluate(&result(0.1, &[0.01, f64::NAN], &[0.01])).unwrap();
        assert!(c.rank_max_error_norm.is_nan());
        assert!(!c.rank_compliant);
        assert!(c.quantile_compliant);
        assert!(!c.compliant());
    }

    #[test]
    fn test_empty_tables_fail() {
        let err = evaluate(&result(0.1, &[], &[0.01])).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::EmptyTable {
                table: TableKind::Rank,
                ..
            }
        ));
        let err = evaluate(&result(0.1, &[0.01], &[])).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::EmptyTable {
                table: TableKind::Quantile,
                ..
            }
        ));
    }
}
