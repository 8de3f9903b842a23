use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use mrl_eval_analysis::{parse_batch, Aggregate};
use mrl_eval_shared::Epsilon;

use crate::commands::load_config;
use crate::output;

const REPORT_EXTENSIONS: [&str; 2] = ["csv", "txt"];

pub fn run(
    inputs: &[String],
    output_dir: &Path,
    epsilons: Vec<Epsilon>,
    workers: usize,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if !epsilons.is_empty() {
        config.epsilons = epsilons;
    }
    if workers > 0 {
        config.workers = Some(workers);
    }

    let files = discover(inputs)?;
    if files.is_empty() {
        bail!("no report files found in {}", inputs.join(", "));
    }
    let available = std::thread::available_parallelism().map_or(1, |n| n.get());
    let n_workers = config.worker_count(available);
    log::info!("parsing {} report files with {} workers", files.len(), n_workers);

    let start = std::time::Instant::now();
    let batch = parse_batch(&files, &config.schema, Some(n_workers))?;
    let aggregate = Aggregate::build(&batch.results)
        .with_context(|| format!("none of the {} report files could be parsed", files.len()))?;
    let comparisons = aggregate.comparisons(&config.epsilons, config.render.histogram_bins)?;
    let elapsed = start.elapsed();

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    let table_path = output_dir.join(output::SUMMARY_TABLE_FILE);
    output::write_summary_csv(&table_path, &aggregate.rows)?;
    let comparisons_path = output_dir.join(output::COMPARISONS_FILE);
    output::write_comparisons_json(&comparisons_path, &config.render, &comparisons)?;

    output::print_summary(&aggregate, batch.failures.len(), elapsed);
    log::info!(
        "wrote {} and {}",
        table_path.display(),
        comparisons_path.display()
    );
    Ok(())
}

/// Report files named by `inputs`, deduplicated, in discovery order.
///
/// A directory contributes its `.csv` and `.txt` files (not recursive, sorted
/// by name); anything else is treated as a glob pattern.
pub fn discover(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for input in inputs {
        let found = if Path::new(input).is_dir() {
            list_dir(Path::new(input))?
        } else {
            expand_glob(input)?
        };
        if found.is_empty() {
            log::warn!("no report files match {input}");
        }
        for path in found {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

fn list_dir(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && has_report_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn expand_glob(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern {pattern}"))? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => log::warn!("skipping unreadable path: {e}"),
        }
    }
    Ok(files)
}

fn has_report_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| REPORT_EXTENSIONS.contains(&ext))
}
