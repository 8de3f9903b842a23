use mrl_eval_shared::{ExperimentResult, ReportSchema};

use crate::error::ParseError;
use crate::header::{parse_header, HEADER_LINES};
use crate::section::{split_sections, Line};
use crate::table::{parse_quantile_table, parse_rank_table};

/// Decodes the full text of one report into an [`ExperimentResult`].
///
/// Pure function of its input: the header is read from the first three lines,
/// then the RANK and QUANTILE tables from their marked sections.
pub fn parse_report(text: &str, schema: &ReportSchema) -> Result<ExperimentResult, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let raw: Vec<&str> = text.lines().collect();

    let header = parse_header(&raw[..raw.len().min(HEADER_LINES)], schema)?;

    let numbered: Vec<Line<'_>> = raw
        .iter()
        .enumerate()
        .skip(HEADER_LINES)
        .map(|(i, l)| (i + 1, *l))
        .collect();
    let sections = split_sections(&numbered, schema)?;

    let rank_table = parse_rank_table(&sections.rank, schema)?;
    let quantile_table = parse_quantile_table(&sections.quantile, schema)?;

    Ok(ExperimentResult {
        dataset: header.dataset,
        n: header.n,
        epsilon: header.epsilon,
        rank_table,
        quantile_table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mrl_eval_shared::TableKind;

    const REPORT: &str = "\
Dataset: Log-normal.txt
n: 1000
epsilon: 0.1

=== Evaluación de RANK ===
Valor,Rank_Real,Rank_Estimado,Error_Absoluto,Error_Normalizado,Error_Esperado
3,12,10,2,0.002,100
250,990,1000,10,0.01,100

Estadísticas RANK:
Error máximo absoluto: 10
Error promedio absoluto: 6
Epsilon: 0.1

=== Evaluación de QUANTILE ===
Phi,Rank_Teorico,Quantile_Real,Quantile_Estimado,Rank_Estimado,Error_Rank_Abs,Error_Rank_Norm,Error_Esperado
0,0,1,1,1,1,0.001,100
0.05,50,4,5,62,12,0.012,100
1,1000,250,250,1000,0,0,100

Estadísticas QUANTILE:
Error máximo absoluto (en rank): 12
Epsilon: 0.1
";

    #[test]
    fn test_parses_harness_report() {
        let result = parse_report(REPORT, &ReportSchema::default()).unwrap();
        assert_eq!(result.dataset, "Log-normal");
        assert_eq!(result.n, 1000);
        assert_eq!(result.epsilon.value(), 0.1);
        assert_eq!(result.rank_table.len(), 2);
        assert_eq!(result.rank_table[1].value, 250.0);
        assert_eq!(result.quantile_table.len(), 3);
        assert_eq!(result.quantile_table[1].error_rank_abs, 12.0);
        assert_eq!(result.quantile_table[2].phi, 1.0);
    }

    #[test]
    fn test_crlf_and_bom() {
        let text = format!("\u{feff}{}", REPORT.replace('\n', "\r\n"));
        let result = parse_report(&text, &ReportSchema::default()).unwrap();
        assert_eq!(result.dataset, "Log-normal");
        assert_eq!(result.quantile_table.len(), 3);
    }

    #[test]
    fn test_table_errors_use_document_lines() {
        let text = REPORT.replace("0.05,50,4,5,62,12,0.012,100", "0.05,50,4,5,62,x,0.012,100");
        match parse_report(&text, &ReportSchema::default()) {
            Err(ParseError::MalformedTable {
                section,
                line,
                column,
                ..
            }) => {
                assert_eq!(section, TableKind::Quantile);
                assert_eq!(line, 18);
                assert_eq!(column.as_deref(), Some("Error_Rank_Abs"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_header_checked_before_sections() {
        let text = REPORT.replacen("n: 1000", "n = 1000", 1);
        let err = parse_report(&text, &ReportSchema::default()).unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeader { line: 2, .. }));
    }

    #[test]
    fn test_localized_schema() {
        let mut schema = ReportSchema::default();
        schema.rank_marker = "=== RANK evaluation ===".to_string();
        schema.quantile_marker = "=== QUANTILE evaluation ===".to_string();
        schema.statistics_prefix = "Statistics".to_string();
        let text = REPORT
            .replace("=== Evaluación de RANK ===", "=== RANK evaluation ===")
            .replace("=== Evaluación de QUANTILE ===", "=== QUANTILE evaluation ===")
            .replace("Estadísticas", "Statistics");
        let result = parse_report(&text, &schema).unwrap();
        assert_eq!(result.rank_table.len(), 2);
        assert_eq!(result.quantile_table.len(), 3);
    }
}
