use std::collections::BTreeMap;

use mrl_eval_shared::{Epsilon, ExperimentResult, SummaryRow};

use crate::comparison::{
    dataset_comparisons, distribution_comparisons, fixed_epsilon_comparison, result_detail,
    Comparisons,
};
use crate::error::AnalysisError;
use crate::grouping::{group_by_dataset, group_by_epsilon};
use crate::lookup::EpsilonMatrix;
use crate::summary::summarize;

/// Summary rows and groupings of one fully parsed batch.
///
/// Built only once every report of the batch has been parsed: the groupings
/// need the complete result set.
#[derive(Debug)]
pub struct Aggregate<'a> {
    pub results: &'a [ExperimentResult],
    pub rows: Vec<SummaryRow>,
    pub by_dataset: BTreeMap<&'a str, Vec<&'a ExperimentResult>>,
    pub by_epsilon: BTreeMap<Epsilon, Vec<&'a ExperimentResult>>,
    pub matrix: EpsilonMatrix<'a>,
}

impl<'a> Aggregate<'a> {
    pub fn build(results: &'a [ExperimentResult]) -> Result<Self, AnalysisError> {
        let rows = summarize(results)?;
        let aggregate = Self {
            results,
            rows,
            by_dataset: group_by_dataset(results),
            by_epsilon: group_by_epsilon(results),
            matrix: EpsilonMatrix::build(results),
        };
        log::info!(
            "aggregated {} results: {} datasets, {} epsilon values, {} compliant",
            aggregate.rows.len(),
            aggregate.by_dataset.len(),
            aggregate.by_epsilon.len(),
            aggregate.compliant_count(),
        );
        Ok(aggregate)
    }

    pub fn compliant_count(&self) -> usize {
        self.rows.iter().filter(|r| r.compliant()).count()
    }

    /// ε set of the fixed-ε comparison: the declared set, or every ε in the
    /// batch from largest to smallest.
    pub fn comparison_epsilons(&self, declared: &[Epsilon]) -> Vec<Epsilon> {
        if declared.is_empty() {
            let mut discovered = self.matrix.epsilons();
            discovered.reverse();
            discovered
        } else {
            declared.to_vec()
        }
    }

    pub fn comparisons(
        &self,
        declared: &[Epsilon],
        histogram_bins: usize,
    ) -> Result<Comparisons, AnalysisError> {
        let epsilons = self.comparison_epsilons(declared);
        for (dataset, epsilon) in self.matrix.gaps(&epsilons) {
            log::warn!("no result for dataset={dataset} epsilon={epsilon}");
        }

        Ok(Comparisons {
            by_dataset: dataset_comparisons(&self.by_dataset),
            by_distribution: distribution_comparisons(&self.by_epsilon)?,
            fixed_epsilon: fixed_epsilon_comparison(&self.matrix, &epsilons)?,
            details: self
                .results
                .iter()
                .map(|r| result_detail(r, histogram_bins))
                .collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrl_eval_shared::{QuantileSample, RankSample};

    fn eps(v: f64) -> Epsilon {
        Epsilon::new(v).unwrap()
    }

    fn result(dataset: &str, epsilon: f64, error: f64) -> ExperimentResult {
        ExperimentResult {
            dataset: dataset.to_string(),
            n: 500,
            epsilon: eps(epsilon),
            rank_table: vec![RankSample {
                value: 2.0,
                rank_real: 3,
                rank_estimated: 4,
                error_absolute: error * 500.0,
                error_normalized: error,
            }],
            quantile_table: vec![QuantileSample {
                phi: 0.25,
                quantile_real: 2.0,
                quantile_estimated: 2.0,
                error_rank_abs: 0.0,
                error_rank_norm: 0.0,
            }],
        }
    }

    #[test]
    fn test_empty_batch_is_no_input() {
        assert!(matches!(Aggregate::build(&[]), Err(AnalysisError::NoInput)));
    }

    #[test]
    fn test_discovered_epsilons_descending() {
        let results = vec![
            result("Uniform", 0.05, 0.01),
            result("Uniform", 0.1, 0.2),
            result("Log-normal", 0.01, 0.001),
        ];
        let aggregate = Aggregate::build(&results).unwrap();
        assert_eq!(
            aggregate.comparison_epsilons(&[]),
            vec![eps(0.1), eps(0.05), eps(0.01)]
        );
        assert_eq!(aggregate.comparison_epsilons(&[eps(0.05)]), vec![eps(0.05)]);
        assert_eq!(aggregate.compliant_count(), 2);
    }

    #[test]
    fn test_comparisons_cover_batch() {
        let results = vec![result("Uniform", 0.05, 0.01), result("Log-normal", 0.1, 0.02)];
        let aggregate = Aggregate::build(&results).unwrap();
        let comparisons = aggregate.comparisons(&[], 20).unwrap();
        assert_eq!(comparisons.by_dataset.len(), 2);
        assert_eq!(comparisons.by_distribution.len(), 2);
        assert_eq!(comparisons.details.len(), 2);
        assert_eq!(comparisons.fixed_epsilon.epsilons, vec![eps(0.1), eps(0.05)]);
        let gaps = comparisons
            .fixed_epsilon
            .rows
            .iter()
            .flat_map(|r| &r.cells)
            .filter(|c| c.is_gap())
            .count();
        assert_eq!(gaps, 2);
    }

    #[test]
    fn test_duplicate_result_keeps_first_in_lookup_only() {
        let results = vec![result("Uniform", 0.05, 0.01), result("Uniform", 0.05, 0.03)];
        let aggregate = Aggregate::build(&results).unwrap();
        assert_eq!(aggregate.rows.len(), 2);
        assert_eq!(aggregate.by_dataset["Uniform"].len(), 2);
        assert_eq!(aggregate.by_epsilon[&eps(0.05)].len(), 2);
        let kept = aggregate.matrix.exact("Uniform", eps(0.05)).unwrap();
        assert!(std::ptr::eq(kept, &results[0]));

        let comparisons = aggregate.comparisons(&[], 20).unwrap();
        let series = &comparisons.by_dataset[0].series;
        assert_eq!(series.len(), 2);
        assert!(series.iter().all(|s| s.epsilon == eps(0.05)));
        assert_eq!(series[0].rank[0].y, 0.01);
        assert_eq!(series[1].rank[0].y, 0.03);
        assert_eq!(comparisons.by_distribution[0].entries.len(), 2);
        assert_eq!(comparisons.details.len(), 2);

        let cells = &comparisons.fixed_epsilon.rows[0].cells;
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].rank_max_error_norm, Some(0.01));
    }
}
