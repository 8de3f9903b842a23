use mrl_eval_shared::{Epsilon, ReportSchema};

use crate::error::ParseError;

pub(crate) const HEADER_LINES: usize = 3;

pub(crate) struct Header {
    pub dataset: String,
    pub n: u64,
    pub epsilon: Epsilon,
}

/// Reads the three `label: value` lines at the top of a report.
pub(crate) fn parse_header(lines: &[&str], schema: &ReportSchema) -> Result<Header, ParseError> {
    let [dataset_label, n_label, epsilon_label] = schema.header_labels();

    let raw_dataset = field(lines, 0, dataset_label)?;
    let dataset = schema.dataset_name(raw_dataset);
    if dataset.is_empty() {
        return Err(malformed(1, "dataset name is empty"));
    }

    let raw_n = field(lines, 1, n_label)?;
    let n = match raw_n.parse::<u64>() {
        Ok(n) if n > 0 => n,
        _ => {
            return Err(malformed(
                2,
                format!("{n_label} must be a positive integer, got {raw_n:?}"),
            ))
        }
    };

    let raw_epsilon = field(lines, 2, epsilon_label)?;
    let epsilon = raw_epsilon
        .parse::<f64>()
        .ok()
        .and_then(Epsilon::new)
        .ok_or_else(|| {
            malformed(
                3,
                format!("{epsilon_label} must be a real in (0, 1), got {raw_epsilon:?}"),
            )
        })?;

    Ok(Header {
        dataset: dataset.to_string(),
        n,
        epsilon,
    })
}

fn field<'a>(lines: &[&'a str], index: usize, label: &str) -> Result<&'a str, ParseError> {
    let line_no = index + 1;
    let line = lines.get(index).ok_or_else(|| {
        malformed(
            line_no,
            format!("expected `{label}: <value>`, found end of document"),
        )
    })?;
    let (found, value) = line
        .split_once(':')
        .ok_or_else(|| malformed(line_no, format!("expected `{label}: <value>`, no ':' found")))?;
    if found.trim() != label {
        return Err(malformed(
            line_no,
            format!("expected label {label:?}, found {:?}", found.trim()),
        ));
    }
    Ok(value.trim())
}

fn malformed(line: usize, reason: impl Into<String>) -> ParseError {
    ParseError::MalformedHeader {
        line,
        reason: reason.into(),
    }
}
