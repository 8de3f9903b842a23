use std::path::PathBuf;

use rayon::prelude::*;

use mrl_eval_parser::{load_report, ReportError};
use mrl_eval_shared::config::MAX_DEFAULT_WORKERS;
use mrl_eval_shared::{ExperimentResult, ReportSchema};

/// Outcome of parsing a batch of report files.
///
/// `results[i]` was parsed from `sources[i]`; both keep the input order.
#[derive(Debug, Default)]
pub struct ParsedBatch {
    pub results: Vec<ExperimentResult>,
    pub sources: Vec<PathBuf>,
    pub failures: Vec<ReportError>,
}

impl ParsedBatch {
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}

/// Explicit positive worker count, or the global pool size capped at
/// [`MAX_DEFAULT_WORKERS`].
fn pool_size(n_workers: Option<usize>) -> usize {
    n_workers
        .filter(|&n| n > 0)
        .unwrap_or_else(|| rayon::current_num_threads().clamp(1, MAX_DEFAULT_WORKERS))
}

/// Parses every file on a bounded worker pool. A file that fails to parse is
/// logged and recorded in `failures`; the rest of the batch is unaffected.
pub fn parse_batch(
    paths: &[PathBuf],
    schema: &ReportSchema,
    n_workers: Option<usize>,
) -> anyhow::Result<ParsedBatch> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(pool_size(n_workers))
        .build()?;

    let outcomes: Vec<Result<ExperimentResult, ReportError>> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| load_report(path, schema))
            .collect()
    });

    let mut batch = ParsedBatch::default();
    for (path, outcome) in paths.iter().zip(outcomes) {
        match outcome {
            Ok(result) => {
                batch.results.push(result);
                batch.sources.push(path.clone());
            }
            Err(err) => {
                log::warn!("skipping {err}");
                batch.failures.push(err);
            }
        }
    }

    log::info!(
        "parsed {}/{} report files ({} failed)",
        batch.results.len(),
        batch.attempted(),
        batch.failures.len(),
    );
    Ok(batch)
}
