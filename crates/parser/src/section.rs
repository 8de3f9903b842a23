use mrl_eval_shared::{ReportSchema, TableKind};

use crate::error::ParseError;

/// A numbered document line (1-based).
pub(crate) type Line<'a> = (usize, &'a str);

/// Table lines of one section, blank lines and the statistics trailer removed.
pub(crate) struct SectionBody<'a> {
    pub kind: TableKind,
    pub marker_line: usize,
    pub lines: Vec<Line<'a>>,
}

pub(crate) struct Sections<'a> {
    pub rank: SectionBody<'a>,
    pub quantile: SectionBody<'a>,
}

/// Locates the RANK and QUANTILE markers and cuts the document into section bodies.
///
/// RANK runs up to the QUANTILE marker, QUANTILE to the end of the document.
/// Within each body the first statistics line ends the table.
pub(crate) fn split_sections<'a>(
    lines: &[Line<'a>],
    schema: &ReportSchema,
) -> Result<Sections<'a>, ParseError> {
    let rank_at = find_marker(lines, schema.rank_marker.trim(), TableKind::Rank)?;
    let quantile_at = find_marker(lines, schema.quantile_marker.trim(), TableKind::Quantile)?;

    let rank_at = rank_at.ok_or(ParseError::MissingSection {
        section: TableKind::Rank,
    })?;
    let quantile_at = quantile_at.ok_or(ParseError::MissingSection {
        section: TableKind::Quantile,
    })?;
    if quantile_at < rank_at {
        return Err(ParseError::MisplacedSection {
            section: TableKind::Quantile,
            line: lines[quantile_at].0,
            reason: "QUANTILE section precedes RANK section".to_string(),
        });
    }

    let prefix = schema.statistics_prefix.as_str();
    Ok(Sections {
        rank: SectionBody {
            kind: TableKind::Rank,
            marker_line: lines[rank_at].0,
            lines: table_lines(&lines[rank_at + 1..quantile_at], prefix),
        },
        quantile: SectionBody {
            kind: TableKind::Quantile,
            marker_line: lines[quantile_at].0,
            lines: table_lines(&lines[quantile_at + 1..], prefix),
        },
    })
}

fn find_marker(
    lines: &[Line<'_>],
    marker: &str,
    kind: TableKind,
) -> Result<Option<usize>, ParseError> {
    let mut found = None;
    for (idx, (line_no, text)) in lines.iter().enumerate() {
        if text.trim() != marker {
            continue;
        }
        if found.is_some() {
            return Err(ParseError::MisplacedSection {
                section: kind,
                line: *line_no,
                reason: "marker appears more than once".to_string(),
            });
        }
        found = Some(idx);
    }
    Ok(found)
}

fn table_lines<'a>(body: &[Line<'a>], statistics_prefix: &str) -> Vec<Line<'a>> {
    body.iter()
        .copied()
        .take_while(|(_, text)| {
            statistics_prefix.is_empty() || !text.trim_start().starts_with(statistics_prefix)
        })
        .filter(|(_, text)| !text.trim().is_empty())
        .collect()
}
