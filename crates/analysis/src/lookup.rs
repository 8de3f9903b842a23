use std::collections::{BTreeMap, BTreeSet};

use mrl_eval_shared::{Epsilon, ExperimentResult};

/// Two-level lookup `dataset × ε → result`.
///
/// A missing combination is `None`, never a zero-valued stand-in.
#[derive(Debug, Default)]
pub struct EpsilonMatrix<'a> {
    cells: BTreeMap<&'a str, BTreeMap<Epsilon, &'a ExperimentResult>>,
}

impl<'a> EpsilonMatrix<'a> {
    /// Indexes `results`. When two results share `(dataset, ε)` the first wins.
    pub fn build(results: &'a [ExperimentResult]) -> Self {
        let mut cells: BTreeMap<&'a str, BTreeMap<Epsilon, &'a ExperimentResult>> =
            BTreeMap::new();
        for result in results {
            let row = cells.entry(result.dataset.as_str()).or_default();
            if row.contains_key(&result.epsilon) {
                log::warn!(
                    "duplicate result for dataset={} epsilon={}, keeping the first one",
                    result.dataset,
                    result.epsilon
                );
                continue;
            }
            row.insert(result.epsilon, result);
        }
        Self { cells }
    }

    pub fn datasets(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.cells.keys().copied()
    }

    /// Every ε present for at least one dataset, ascending.
    pub fn epsilons(&self) -> Vec<Epsilon> {
        self.cells
            .values()
            .flat_map(|row| row.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn exact(&self, dataset: &str, epsilon: Epsilon) -> Option<&'a ExperimentResult> {
        self.cells.get(dataset)?.get(&epsilon).copied()
    }

    /// Result whose ε is nearest to `epsilon`, if within `tolerance`.
    /// Equidistant candidates resolve to the smaller ε.
    pub fn closest(
        &self,
        dataset: &str,
        epsilon: Epsilon,
        tolerance: f64,
    ) -> Option<&'a ExperimentResult> {
        let target = epsilon.value();
        self.cells
            .get(dataset)?
            .iter()
            .map(|(eps, result)| ((eps.value() - target).abs(), *result))
            .filter(|(distance, _)| *distance <= tolerance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, result)| result)
    }

    /// `(dataset, ε)` combinations from `epsilons` that have no result.
    pub fn gaps(&self, epsilons: &[Epsilon]) -> Vec<(&'a str, Epsilon)> {
        self.cells
            .iter()
            .flat_map(|(dataset, row)| {
                epsilons
                    .iter()
                    .filter(move |eps| !row.contains_key(*eps))
                    .map(move |eps| (*dataset, *eps))
            })
            .collect()
    }
}
