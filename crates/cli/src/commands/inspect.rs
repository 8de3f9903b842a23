use std::path::Path;

use mrl_eval_analysis::summarize_result;
use mrl_eval_parser::load_report;

use crate::commands::load_config;
use crate::output;

pub fn run(path: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let result = load_report(path, &config.schema)?;
    let row = summarize_result(&result)?;
    output::print_report(&result, &row);
    Ok(())
}
