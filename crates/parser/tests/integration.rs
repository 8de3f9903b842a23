use mrl_eval_parser::{parse_report, ParseError};
use mrl_eval_shared::{Epsilon, ExperimentResult, QuantileSample, RankSample, ReportSchema};
use proptest::prelude::*;

/// Writes a report in the harness layout, statistics trailers included.
fn render(result: &ExperimentResult) -> String {
    let mut out = format!(
        "Dataset: {}.txt\nn: {}\nepsilon: {}\n",
        result.dataset, result.n, result.epsilon
    );
    out.push_str("\n=== Evaluación de RANK ===\n");
    out.push_str("Valor,Rank_Real,Rank_Estimado,Error_Absoluto,Error_Normalizado,Error_Esperado\n");
    for r in &result.rank_table {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            r.value,
            r.rank_real,
            r.rank_estimated,
            r.error_absolute,
            r.error_normalized,
            result.expected_error()
        ));
    }
    out.push_str("\nEstadísticas RANK:\nError máximo absoluto: 0\n");
    out.push_str("\n=== Evaluación de QUANTILE ===\n");
    out.push_str("Phi,Quantile_Real,Quantile_Estimado,Error_Rank_Abs,Error_Rank_Norm\n");
    for q in &result.quantile_table {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            q.phi, q.quantile_real, q.quantile_estimated, q.error_rank_abs, q.error_rank_norm
        ));
    }
    out.push_str("\nEstadísticas QUANTILE:\nEpsilon: 0\n");
    out
}

fn rank_sample() -> impl Strategy<Value = RankSample> {
    (-1e9f64..1e9, 0i64..1_000_000, 0i64..1_000_000, 0.0f64..1.0).prop_map(
        |(value, rank_real, rank_estimated, error_normalized)| RankSample {
            value,
            rank_real,
            rank_estimated,
            error_absolute: (rank_real - rank_estimated).abs() as f64,
            error_normalized,
        },
    )
}

fn quantile_sample() -> impl Strategy<Value = QuantileSample> {
    (0.0f64..=1.0, -1e6f64..1e6, -1e6f64..1e6, 0u32..100_000, 0.0f64..1.0).prop_map(
        |(phi, quantile_real, quantile_estimated, error_rank_abs, error_rank_norm)| {
            QuantileSample {
                phi,
                quantile_real,
                quantile_estimated,
                error_rank_abs: error_rank_abs as f64,
                error_rank_norm,
            }
        },
    )
}

fn experiment() -> impl Strategy<Value = ExperimentResult> {
    (
        "[A-Za-z][A-Za-z0-9_-]{0,15}",
        1u64..10_000_000,
        0.001f64..0.999,
        prop::collection::vec(rank_sample(), 1..40),
        prop::collection::vec(quantile_sample(), 1..40),
    )
        .prop_map(|(dataset, n, eps, rank_table, quantile_table)| ExperimentResult {
            dataset,
            n,
            epsilon: Epsilon::new(eps).unwrap(),
            rank_table,
            quantile_table,
        })
}

proptest! {
    #[test]
    fn prop_report_roundtrip(expected in experiment()) {
        let text = render(&expected);
        let parsed = parse_report(&text, &ReportSchema::default()).unwrap();
        prop_assert_eq!(parsed, expected);
    }
}

#[test]
fn test_worked_example_report() {
    let expected = ExperimentResult {
        dataset: "Uniform".to_string(),
        n: 1000,
        epsilon: Epsilon::new(0.05).unwrap(),
        rank_table: [10.0, 40.0, 50.0]
            .iter()
            .enumerate()
            .map(|(i, &abs)| RankSample {
                value: i as f64 * 100.0,
                rank_real: i as i64 * 100,
                rank_estimated: i as i64 * 100 + abs as i64,
                error_absolute: abs,
                error_normalized: abs / 1000.0,
            })
            .collect(),
        quantile_table: vec![QuantileSample {
            phi: 0.5,
            quantile_real: 500.0,
            quantile_estimated: 510.0,
            error_rank_abs: 10.0,
            error_rank_norm: 0.01,
        }],
    };
    let parsed = parse_report(&render(&expected), &ReportSchema::default()).unwrap();
    let errors: Vec<f64> = parsed.rank_errors_normalized().collect();
    assert_eq!(errors, vec![0.01, 0.04, 0.05]);
    assert_eq!(parsed, expected);
}

#[test]
fn test_missing_quantile_marker_is_missing_section() {
    let expected = ExperimentResult {
        dataset: "chicago2016".to_string(),
        n: 10,
        epsilon: Epsilon::new(0.1).unwrap(),
        rank_table: vec![RankSample {
            value: 1.0,
            rank_real: 1,
            rank_estimated: 1,
            error_absolute: 0.0,
            error_normalized: 0.0,
        }],
        quantile_table: vec![QuantileSample {
            phi: 0.0,
            quantile_real: 1.0,
            quantile_estimated: 1.0,
            error_rank_abs: 0.0,
            error_rank_norm: 0.0,
        }],
    };
    let text = render(&expected).replace("=== Evaluación de QUANTILE ===", "");
    let err = parse_report(&text, &ReportSchema::default()).unwrap_err();
    assert!(matches!(err, ParseError::MissingSection { .. }), "{err}");
    assert_eq!(err.to_string(), "missing QUANTILE section");
}
