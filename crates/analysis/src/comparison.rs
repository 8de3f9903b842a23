//! Renderer-facing comparison data.
//!
//! Each type here backs one family of figures: per-dataset ε comparison,
//! per-ε distribution comparison, the fixed-ε side-by-side bars, and the
//! per-result detail panels. Values are plain numbers; gaps stay `None`.

use std::collections::BTreeMap;

use mrl_eval_shared::{Epsilon, ExperimentResult, TableKind};
use serde::Serialize;

use crate::compliance::{empty_table, evaluate};
use crate::error::AnalysisError;
use crate::lookup::EpsilonMatrix;
use crate::stats::{self, BoxSummary, Histogram};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Normalized errors of one result, against the queried value (rank) or φ (quantile).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpsilonSeries {
    pub epsilon: Epsilon,
    pub n: u64,
    pub rank: Vec<Point>,
    pub quantile: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetComparison {
    pub dataset: String,
    pub series: Vec<EpsilonSeries>,
}

impl DatasetComparison {
    /// A dataset measured at a single ε has nothing to compare against.
    pub fn is_comparable(&self) -> bool {
        self.series.len() >= 2
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub dataset: String,
    pub rank: BoxSummary,
    pub quantile: BoxSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionComparison {
    pub epsilon: Epsilon,
    pub limit: f64,
    pub entries: Vec<DistributionEntry>,
}

/// Max normalized errors of one dataset at one ε; `None` when no result exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FixedEpsilonCell {
    pub epsilon: Epsilon,
    pub rank_max_error_norm: Option<f64>,
    pub quantile_max_error_norm: Option<f64>,
}

impl FixedEpsilonCell {
    pub fn is_gap(&self) -> bool {
        self.rank_max_error_norm.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedEpsilonRow {
    pub dataset: String,
    pub cells: Vec<FixedEpsilonCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedEpsilonComparison {
    pub epsilons: Vec<Epsilon>,
    pub rows: Vec<FixedEpsilonRow>,
}

/// Extent of the `x = y` reference line drawn over a real-vs-estimated scatter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealLine {
    pub min: f64,
    pub max: f64,
}

impl IdealLine {
    /// Smallest and largest coordinate over both axes.
    pub fn spanning(points: &[Point]) -> Option<Self> {
        let coords = points.iter().flat_map(|p| [p.x, p.y]);
        Some(Self {
            min: stats::min(coords.clone())?,
            max: stats::max(coords)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultDetail {
    pub dataset: String,
    pub epsilon: Epsilon,
    pub n: u64,
    /// εn, the absolute rank error the guarantee allows.
    pub expected_error: f64,
    pub rank_mean_error_norm: f64,
    pub quantile_mean_error_norm: f64,
    pub rank_histogram: Histogram,
    pub quantile_histogram: Histogram,
    /// Absolute rank error against the queried value.
    pub rank_abs_errors: Vec<Point>,
    /// Estimated rank against the real rank.
    pub rank_estimates: Vec<Point>,
    pub rank_ideal: IdealLine,
    /// Absolute rank error against φ.
    pub quantile_abs_errors: Vec<Point>,
    /// Estimated quantile against the real quantile.
    pub quantile_estimates: Vec<Point>,
    pub quantile_ideal: IdealLine,
}

/// Everything the renderer needs for the comparison figures of one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparisons {
    pub by_dataset: Vec<DatasetComparison>,
    pub by_distribution: Vec<DistributionComparison>,
    pub fixed_epsilon: FixedEpsilonComparison,
    pub details: Vec<ResultDetail>,
}

pub fn dataset_comparisons(
    by_dataset: &BTreeMap<&str, Vec<&ExperimentResult>>,
) -> Vec<DatasetComparison> {
    by_dataset
        .iter()
        .map(|(dataset, members)| DatasetComparison {
            dataset: dataset.to_string(),
            series: members
                .iter()
                .map(|r| EpsilonSeries {
                    epsilon: r.epsilon,
                    n: r.n,
                    rank: r
                        .rank_table
                        .iter()
                        .map(|s| Point {
                            x: s.value,
                            y: s.error_normalized,
                        })
                        .collect(),
                    quantile: r
                        .quantile_table
                        .iter()
                        .map(|s| Point {
                            x: s.phi,
                            y: s.error_rank_norm,
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect()
}

pub fn distribution_comparisons(
    by_epsilon: &BTreeMap<Epsilon, Vec<&ExperimentResult>>,
) -> Result<Vec<DistributionComparison>, AnalysisError> {
    by_epsilon
        .iter()
        .map(|(epsilon, members)| -> Result<DistributionComparison, AnalysisError> {
            let mut entries = members
                .iter()
                .map(|r| -> Result<DistributionEntry, AnalysisError> {
                    Ok(DistributionEntry {
                        dataset: r.dataset.clone(),
                        rank: box_summary(r, TableKind::Rank)?,
                        quantile: box_summary(r, TableKind::Quantile)?,
                    })
                })
                .collect::<Result<Vec<_>, AnalysisError>>()?;
            entries.sort_by(|a, b| a.dataset.cmp(&b.dataset));
            Ok(DistributionComparison {
                epsilon: *epsilon,
                limit: epsilon.value(),
                entries,
            })
        })
        .collect()
}

fn box_summary(result: &ExperimentResult, table: TableKind) -> Result<BoxSummary, AnalysisError> {
    BoxSummary::from_values(&result.errors_normalized(table))
        .ok_or_else(|| empty_table(result, table))
}

/// Side-by-side max errors for a declared ε set, one row per dataset.
pub fn fixed_epsilon_comparison(
    matrix: &EpsilonMatrix<'_>,
    epsilons: &[Epsilon],
) -> Result<FixedEpsilonComparison, AnalysisError> {
    let rows = matrix
        .datasets()
        .map(|dataset| -> Result<FixedEpsilonRow, AnalysisError> {
            let cells = epsilons
                .iter()
                .map(|&epsilon| -> Result<FixedEpsilonCell, AnalysisError> {
                    let compliance = matrix
                        .exact(dataset, epsilon)
                        .map(evaluate)
                        .transpose()?;
                    Ok(FixedEpsilonCell {
                        epsilon,
                        rank_max_error_norm: compliance.map(|c| c.rank_max_error_norm),
                        quantile_max_error_norm: compliance.map(|c| c.quantile_max_error_norm),
                    })
                })
                .collect::<Result<Vec<_>, AnalysisError>>()?;
            Ok(FixedEpsilonRow {
                dataset: dataset.to_string(),
                cells,
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Ok(FixedEpsilonComparison {
        epsilons: epsilons.to_vec(),
        rows,
    })
}

pub fn result_detail(result: &ExperimentResult, bins: usize) -> Result<ResultDetail, AnalysisError> {
    let rank = result.errors_normalized(TableKind::Rank);
    let quantile = result.errors_normalized(TableKind::Quantile);
    let rank_empty = || empty_table(result, TableKind::Rank);
    let quantile_empty = || empty_table(result, TableKind::Quantile);

    let rank_estimates: Vec<Point> = result
        .rank_table
        .iter()
        .map(|s| Point {
            x: s.rank_real as f64,
            y: s.rank_estimated as f64,
        })
        .collect();
    let quantile_estimates: Vec<Point> = result
        .quantile_table
        .iter()
        .map(|s| Point {
            x: s.quantile_real,
            y: s.quantile_estimated,
        })
        .collect();

    Ok(ResultDetail {
        dataset: result.dataset.clone(),
        epsilon: result.epsilon,
        n: result.n,
        expected_error: result.expected_error(),
        rank_mean_error_norm: stats::mean(rank.iter().copied()).ok_or_else(rank_empty)?,
        quantile_mean_error_norm: stats::mean(quantile.iter().copied())
            .ok_or_else(quantile_empty)?,
        rank_histogram: Histogram::from_values(&rank, bins.max(1)).ok_or_else(rank_empty)?,
        quantile_histogram: Histogram::from_values(&quantile, bins.max(1))
            .ok_or_else(quantile_empty)?,
        rank_abs_errors: result
            .rank_table
            .iter()
            .map(|s| Point {
                x: s.value,
                y: s.error_absolute,
            })
            .collect(),
        rank_ideal: IdealLine::spanning(&rank_estimates).ok_or_else(rank_empty)?,
        rank_estimates,
        quantile_abs_errors: result
            .quantile_table
            .iter()
            .map(|s| Point {
                x: s.phi,
                y: s.error_rank_abs,
            })
            .collect(),
        quantile_ideal: IdealLine::spanning(&quantile_estimates).ok_or_else(quantile_empty)?,
        quantile_estimates,
    })
}
