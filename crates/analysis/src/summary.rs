use mrl_eval_shared::{ExperimentResult, SummaryRow, TableKind};

use crate::compliance::{empty_table, evaluate};
use crate::error::AnalysisError;
use crate::stats;

pub fn summarize_result(result: &ExperimentResult) -> Result<SummaryRow, AnalysisError> {
    let compliance = evaluate(result)?;

    let rank_avg = stats::mean(result.rank_errors_normalized())
        .ok_or_else(|| empty_table(result, TableKind::Rank))?;
    let rank_max_abs = stats::max(result.rank_table.iter().map(|r| r.error_absolute))
        .ok_or_else(|| empty_table(result, TableKind::Rank))?;
    let quantile_avg = stats::mean(result.quantile_errors_normalized())
        .ok_or_else(|| empty_table(result, TableKind::Quantile))?;
    let quantile_max_abs = stats::max(result.quantile_table.iter().map(|q| q.error_rank_abs))
        .ok_or_else(|| empty_table(result, TableKind::Quantile))?;

    Ok(SummaryRow {
        dataset: result.dataset.clone(),
        n: result.n,
        epsilon: result.epsilon,
        rank_max_error_norm: compliance.rank_max_error_norm,
        rank_avg_error_norm: rank_avg,
        rank_max_error_abs: rank_max_abs,
        quantile_max_error_norm: compliance.quantile_max_error_norm,
        quantile_avg_error_norm: quantile_avg,
        quantile_max_error_abs: quantile_max_abs,
        rank_compliant: compliance.rank_compliant,
        quantile_compliant: compliance.quantile_compliant,
    })
}

/// One summary row per result, in input order. An empty batch is an error.
pub fn summarize(results: &[ExperimentResult]) -> Result<Vec<SummaryRow>, AnalysisError> {
    if results.is_empty() {
        return Err(AnalysisError::NoInput);
    }
    results.iter().map(summarize_result).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrl_eval_shared::{Epsilon, QuantileSample, RankSample};

    fn worked_example() -> ExperimentResult {
        ExperimentResult {
            dataset: "Uniform".to_string(),
            n: 1000,
            epsilon: Epsilon::new(0.05).unwrap(),
            rank_table: [(10.0, 0.01), (40.0, 0.04), (50.0, 0.05)]
                .iter()
                .map(|&(abs, norm)| RankSample {
                    value: 1.0,
                    rank_real: 1,
                    rank_estimated: 1,
                    error_absolute: abs,
                    error_normalized: norm,
                })
                .collect(),
            quantile_table: vec![
                QuantileSample {
                    phi: 0.0,
                    quantile_real: 1.0,
                    quantile_estimated: 1.0,
                    error_rank_abs: 2.0,
                    error_rank_norm: 0.002,
                },
                QuantileSample {
                    phi: 1.0,
                    quantile_real: 9.0,
                    quantile_estimated: 8.0,
                    error_rank_abs: 60.0,
                    error_rank_norm: 0.06,
                },
            ],
        }
    }

    #[test]
    fn test_worked_example() {
        let row = summarize_result(&worked_example()).unwrap();
        assert_eq!(row.dataset, "Uniform");
        assert_eq!(row.n, 1000);
        assert_eq!(row.rank_max_error_norm, 0.05);
        assert!((row.rank_avg_error_norm - 0.0333).abs() < 1e-4);
        assert_eq!(row.rank_max_error_abs, 50.0);
        assert!(row.rank_compliant);
        assert_eq!(row.quantile_max_error_norm, 0.06);
        assert_eq!(row.quantile_max_error_abs, 60.0);
        assert!((row.quantile_avg_error_norm - 0.031).abs() < 1e-12);
        assert!(!row.quantile_compliant);
        assert!(!row.compliant());
    }

    #[test]
    fn test_empty_batch_is_no_input() {
        assert!(matches!(summarize(&[]), Err(AnalysisError::NoInput)));
    }

    #[test]
    fn test_preserves_input_order() {
        let mut second = worked_example();
        second.dataset = "Log-normal".to_string();
        let rows = summarize(&[worked_example(), second]).unwrap();
        let names: Vec<&str> = rows.iter().map(|r| r.dataset.as_str()).collect();
        assert_eq!(names, ["Uniform", "Log-normal"]);
    }
}
