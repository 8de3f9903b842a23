pub mod inspect;
pub mod summarize;

use std::path::Path;

use anyhow::Context;
use mrl_eval_shared::AnalysisConfig;

/// Config from `path`, or the built-in defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    match path {
        Some(path) => {
            let config = AnalysisConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?;
            log::debug!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(AnalysisConfig::default()),
    }
}
