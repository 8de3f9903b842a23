use serde::{Deserialize, Serialize};

// Tokens written by the experimental harness.
pub const DATASET_LABEL: &str = "Dataset";
pub const N_LABEL: &str = "n";
pub const EPSILON_LABEL: &str = "epsilon";
pub const RANK_MARKER: &str = "=== Evaluación de RANK ===";
pub const QUANTILE_MARKER: &str = "=== Evaluación de QUANTILE ===";
pub const STATISTICS_PREFIX: &str = "Estadísticas";
pub const DATASET_SUFFIX: &str = ".txt";
pub const DELIMITER: char = ',';

/// Column names of the RANK table that the parser extracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankColumns {
    pub value: String,
    pub rank_real: String,
    pub rank_estimated: String,
    pub error_absolute: String,
    pub error_normalized: String,
}

impl Default for RankColumns {
    fn default() -> Self {
        Self {
            value: "Valor".to_string(),
            rank_real: "Rank_Real".to_string(),
            rank_estimated: "Rank_Estimado".to_string(),
            error_absolute: "Error_Absoluto".to_string(),
            error_normalized: "Error_Normalizado".to_string(),
        }
    }
}

impl RankColumns {
    pub fn names(&self) -> [&str; 5] {
        [
            &self.value,
            &self.rank_real,
            &self.rank_estimated,
            &self.error_absolute,
            &self.error_normalized,
        ]
    }
}

/// Column names of the QUANTILE table that the parser extracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantileColumns {
    pub phi: String,
    pub quantile_real: String,
    pub quantile_estimated: String,
    pub error_rank_abs: String,
    pub error_rank_norm: String,
}

impl Default for QuantileColumns {
    fn default() -> Self {
        Self {
            phi: "Phi".to_string(),
            quantile_real: "Quantile_Real".to_string(),
            quantile_estimated: "Quantile_Estimado".to_string(),
            error_rank_abs: "Error_Rank_Abs".to_string(),
            error_rank_norm: "Error_Rank_Norm".to_string(),
        }
    }
}

impl QuantileColumns {
    pub fn names(&self) -> [&str; 5] {
        [
            &self.phi,
            &self.quantile_real,
            &self.quantile_estimated,
            &self.error_rank_abs,
            &self.error_rank_norm,
        ]
    }
}

/// Declarative description of the report layout.
///
/// Header labels are matched in order on the first three lines. Markers must
/// occupy a whole line (surrounding whitespace ignored). Lines starting with
/// `statistics_prefix` end the table of the section they appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSchema {
    pub dataset_label: String,
    pub n_label: String,
    pub epsilon_label: String,
    pub rank_marker: String,
    pub quantile_marker: String,
    pub statistics_prefix: String,
    pub dataset_suffix: String,
    pub delimiter: char,
    pub rank_columns: RankColumns,
    pub quantile_columns: QuantileColumns,
}

impl Default for ReportSchema {
    fn default() -> Self {
        Self {
            dataset_label: DATASET_LABEL.to_string(),
            n_label: N_LABEL.to_string(),
            epsilon_label: EPSILON_LABEL.to_string(),
            rank_marker: RANK_MARKER.to_string(),
            quantile_marker: QUANTILE_MARKER.to_string(),
            statistics_prefix: STATISTICS_PREFIX.to_string(),
            dataset_suffix: DATASET_SUFFIX.to_string(),
            delimiter: DELIMITER,
            rank_columns: RankColumns::default(),
            quantile_columns: QuantileColumns::default(),
        }
    }
}

impl ReportSchema {
    pub fn header_labels(&self) -> [&str; 3] {
        [&self.dataset_label, &self.n_label, &self.epsilon_label]
    }

    /// Strips the configured suffix (e.g. `.txt`) from a raw dataset name.
    pub fn dataset_name<'a>(&self, raw: &'a str) -> &'a str {
        if self.dataset_suffix.is_empty() {
            return raw;
        }
        raw.strip_suffix(self.dataset_suffix.as_str()).unwrap_or(raw)
    }

    /// Returns a description of the first structural problem, if any.
    pub fn check(&self) -> Result<(), String> {
        if !self.delimiter.is_ascii() {
            return Err(format!("delimiter {:?} is not ASCII", self.delimiter));
        }
        if self.rank_marker.trim().is_empty() || self.quantile_marker.trim().is_empty() {
            return Err("section markers must not be blank".to_string());
        }
        if self.rank_marker.trim() == self.quantile_marker.trim() {
            return Err("RANK and QUANTILE markers must differ".to_string());
        }
        if self.header_labels().iter().any(|l| l.trim().is_empty()) {
            return Err("header labels must not be blank".to_string());
        }
        for (section, names) in [
            ("RANK", self.rank_columns.names()),
            ("QUANTILE", self.quantile_columns.names()),
        ] {
            for (i, name) in names.iter().enumerate() {
                if name.trim().is_empty() {
                    return Err(format!("{section} column {i} has a blank name"));
                }
                if names[..i].contains(name) {
                    return Err(format!("{section} column {name:?} is declared twice"));
                }
            }
        }
        Ok(())
    }
}
