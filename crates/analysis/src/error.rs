use mrl_eval_shared::{Epsilon, TableKind};

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("{table} table of {dataset} (epsilon={epsilon}) is empty")]
    EmptyTable {
        dataset: String,
        epsilon: Epsilon,
        table: TableKind,
    },
    #[error("no report was parsed successfully, nothing to aggregate")]
    NoInput,
}
