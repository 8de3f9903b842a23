use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use mrl_eval_analysis::{Aggregate, Comparisons};
use mrl_eval_shared::{ExperimentResult, RenderConfig, SummaryRow};
use serde::Serialize;

pub const SUMMARY_TABLE_FILE: &str = "summary_table.csv";
pub const COMPARISONS_FILE: &str = "comparisons.json";

/// Document handed to the chart renderer.
#[derive(Serialize)]
struct RenderInput<'a> {
    render: &'a RenderConfig,
    comparisons: &'a Comparisons,
}

pub fn write_summary_csv(path: &Path, rows: &[SummaryRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_comparisons_json(
    path: &Path,
    render: &RenderConfig,
    comparisons: &Comparisons,
) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &RenderInput { render, comparisons })
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn verdict(compliant: bool) -> &'static str {
    if compliant {
        "yes"
    } else {
        "NO"
    }
}

pub fn print_summary(aggregate: &Aggregate<'_>, failed: usize, elapsed: Duration) {
    println!(
        "{:<20} {:>10} {:>8} {:>10} {:>10} {:>10} {:>10} {:>5}",
        "Dataset", "n", "epsilon", "rank_max", "rank_avg", "quant_max", "quant_avg", "ok"
    );
    for row in &aggregate.rows {
        println!(
            "{:<20} {:>10} {:>8} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>5}",
            row.dataset,
            row.n,
            row.epsilon.to_string(),
            row.rank_max_error_norm,
            row.rank_avg_error_norm,
            row.quantile_max_error_norm,
            row.quantile_avg_error_norm,
            verdict(row.compliant()),
        );
    }

    println!("\n========================================");
    println!("  Reports:     {}", aggregate.rows.len());
    println!("  Failed:      {}", failed);
    println!("  Datasets:    {}", aggregate.by_dataset.len());
    println!("  Epsilons:    {}", aggregate.by_epsilon.len());
    println!("  Compliant:   {}/{}", aggregate.compliant_count(), aggregate.rows.len());
    println!("  Time:        {:.2}s", elapsed.as_secs_f64());
    println!("========================================");
}

pub fn print_report(result: &ExperimentResult, row: &SummaryRow) {
    println!("Dataset:       {}", result.dataset);
    println!("n:             {}", result.n);
    println!("epsilon:       {}", result.epsilon);
    println!("Expected err:  {:.2}", result.expected_error());
    println!();
    println!(
        "RANK      rows={:<6} max={:.6} avg={:.6} max_abs={} compliant={}",
        result.rank_table.len(),
        row.rank_max_error_norm,
        row.rank_avg_error_norm,
        row.rank_max_error_abs,
        verdict(row.rank_compliant),
    );
    println!(
        "QUANTILE  rows={:<6} max={:.6} avg={:.6} max_abs={} compliant={}",
        result.quantile_table.len(),
        row.quantile_max_error_norm,
        row.quantile_avg_error_norm,
        row.quantile_max_error_abs,
        verdict(row.quantile_compliant),
    );
}
