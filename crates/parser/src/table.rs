use csv::StringRecord;
use mrl_eval_shared::{QuantileSample, RankSample, ReportSchema, TableKind};

use crate::error::ParseError;
use crate::section::SectionBody;

/// Cells of one data row, with enough context to report a failing cell.
struct Cells<'r> {
    section: TableKind,
    line: usize,
    record: &'r StringRecord,
}

impl Cells<'_> {
    fn raw(&self, idx: usize) -> &str {
        self.record.get(idx).unwrap_or("")
    }

    fn fail(&self, column: &str, reason: String) -> ParseError {
        ParseError::MalformedTable {
            section: self.section,
            line: self.line,
            column: Some(column.to_string()),
            reason,
        }
    }

    fn real(&self, idx: usize, column: &str) -> Result<f64, ParseError> {
        let raw = self.raw(idx);
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(self.fail(column, format!("expected a finite number, got {raw:?}"))),
        }
    }

    fn integer(&self, idx: usize, column: &str) -> Result<i64, ParseError> {
        let raw = self.raw(idx);
        raw.parse::<i64>()
            .map_err(|_| self.fail(column, format!("expected an integer, got {raw:?}")))
    }

    fn error(&self, idx: usize, column: &str) -> Result<f64, ParseError> {
        let v = self.real(idx, column)?;
        if v < 0.0 {
            return Err(self.fail(column, format!("error must be non-negative, got {v}")));
        }
        Ok(v)
    }

    fn fraction(&self, idx: usize, column: &str) -> Result<f64, ParseError> {
        let v = self.real(idx, column)?;
        if !(0.0..=1.0).contains(&v) {
            return Err(self.fail(column, format!("expected a value in [0, 1], got {v}")));
        }
        Ok(v)
    }
}

/// Parses a delimiter-separated table whose first line is the header row.
///
/// Every name in `required` must appear exactly once in the header; other
/// columns are allowed and ignored. Every row must have as many cells as the
/// header, and at least one data row is required.
fn read_table<T, const N: usize>(
    body: &SectionBody<'_>,
    delimiter: char,
    required: [&str; N],
    mut decode: impl FnMut(&Cells<'_>, &[usize; N]) -> Result<T, ParseError>,
) -> Result<Vec<T>, ParseError> {
    let section = body.kind;
    let malformed = |line: usize, column: Option<&str>, reason: String| ParseError::MalformedTable {
        section,
        line,
        column: column.map(str::to_string),
        reason,
    };

    let delimiter = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| {
            malformed(
                body.marker_line,
                None,
                format!("delimiter {delimiter:?} is not a single ASCII character"),
            )
        })?;

    let joined = body
        .lines
        .iter()
        .map(|(_, text)| *text)
        .collect::<Vec<_>>()
        .join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(joined.as_bytes());

    // Map a record's line in `joined` back to its document line.
    let doc_line = |record: &StringRecord, fallback: usize| -> usize {
        let local = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(fallback);
        body.lines
            .get(local.saturating_sub(1))
            .map(|(line_no, _)| *line_no)
            .unwrap_or(body.marker_line)
    };

    let mut records = reader.records().enumerate();

    let header = match records.next() {
        Some((_, Ok(record))) => record,
        Some((_, Err(e))) => {
            let line = body.lines.first().map_or(body.marker_line, |(n, _)| *n);
            return Err(malformed(line, None, e.to_string()));
        }
        None => {
            return Err(malformed(
                body.marker_line,
                None,
                "section has no header row".to_string(),
            ))
        }
    };
    let header_line = doc_line(&header, 1);

    let mut indices = [0usize; N];
    for (slot, name) in indices.iter_mut().zip(required) {
        let mut positions = header.iter().enumerate().filter(|(_, h)| *h == name);
        *slot = match (positions.next(), positions.next()) {
            (Some((idx, _)), None) => idx,
            (None, _) => {
                return Err(malformed(
                    header_line,
                    Some(name),
                    "required column missing from header".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(malformed(
                    header_line,
                    Some(name),
                    "column appears more than once in header".to_string(),
                ))
            }
        };
    }

    let mut rows = Vec::new();
    for (idx, result) in records {
        let record = result.map_err(|e| {
            let line = body.lines.get(idx).map_or(body.marker_line, |(n, _)| *n);
            malformed(line, None, e.to_string())
        })?;
        let line = doc_line(&record, idx + 1);
        if record.len() != header.len() {
            return Err(malformed(
                line,
                None,
                format!(
                    "expected {} cells, found {}",
                    header.len(),
                    record.len()
                ),
            ));
        }
        let cells = Cells {
            section,
            line,
            record: &record,
        };
        rows.push(decode(&cells, &indices)?);
    }

    if rows.is_empty() {
        return Err(malformed(
            header_line,
            None,
            "table has no data rows".to_string(),
        ));
    }
    Ok(rows)
}

pub(crate) fn parse_rank_table(
    body: &SectionBody<'_>,
    schema: &ReportSchema,
) -> Result<Vec<RankSample>, ParseError> {
    let names = schema.rank_columns.names();
    read_table(body, schema.delimiter, names, |cells, idx| {
        Ok(RankSample {
            value: cells.real(idx[0], names[0])?,
            rank_real: cells.integer(idx[1], names[1])?,
            rank_estimated: cells.integer(idx[2], names[2])?,
            error_absolute: cells.error(idx[3], names[3])?,
            error_normalized: cells.error(idx[4], names[4])?,
        })
    })
}

pub(crate) fn parse_quantile_table(
    body: &SectionBody<'_>,
    schema: &ReportSchema,
) -> Result<Vec<QuantileSample>, ParseError> {
    let names = schema.quantile_columns.names();
    read_table(body, schema.delimiter, names, |cells, idx| {
        Ok(QuantileSample {
            phi: cells.fraction(idx[0], names[0])?,
            quantile_real: cells.real(idx[1], names[1])?,
            quantile_estimated: cells.real(idx[2], names[2])?,
            error_rank_abs: cells.error(idx[3], names[3])?,
            error_rank_norm: cells.error(idx[4], names[4])?,
        })
    })
}
