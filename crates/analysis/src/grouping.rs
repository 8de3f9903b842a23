use std::collections::BTreeMap;

use mrl_eval_shared::{Epsilon, ExperimentResult};

/// Results per dataset (exact, case-sensitive name), each group in ascending ε.
pub fn group_by_dataset(results: &[ExperimentResult]) -> BTreeMap<&str, Vec<&ExperimentResult>> {
    let mut groups: BTreeMap<&str, Vec<&ExperimentResult>> = BTreeMap::new();
    for result in results {
        groups.entry(result.dataset.as_str()).or_default().push(result);
    }
    for members in groups.values_mut() {
        members.sort_by_key(|r| r.epsilon);
    }
    groups
}

/// Results per distinct ε, each group in input order.
pub fn group_by_epsilon(results: &[ExperimentResult]) -> BTreeMap<Epsilon, Vec<&ExperimentResult>> {
    let mut groups: BTreeMap<Epsilon, Vec<&ExperimentResult>> = BTreeMap::new();
    for result in results {
        groups.entry(result.epsilon).or_default().push(result);
    }
    groups
}
