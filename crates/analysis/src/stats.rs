use serde::Serialize;

const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Largest value. A NaN anywhere makes the result NaN.
pub fn max(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    extreme(values, f64::max)
}

/// Smallest value. A NaN anywhere makes the result NaN.
pub fn min(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    extreme(values, f64::min)
}

fn extreme(values: impl IntoIterator<Item = f64>, pick: fn(f64, f64) -> f64) -> Option<f64> {
    values.into_iter().fold(None, |acc: Option<f64>, v| {
        Some(match acc {
            None => v,
            Some(m) if m.is_nan() || v.is_nan() => f64::NAN,
            Some(m) => pick(m, v),
        })
    })
}

pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Linear-interpolated percentile of sorted data, `p` in [0, 1].
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Five-number summary plus whiskers, as drawn by a box-and-whisker plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: usize,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile_sorted(&sorted, 0.25);
        let q3 = percentile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let inside = sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
        let whisker_low = inside.clone().next().unwrap_or(q1);
        let whisker_high = inside.last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .filter(|v| !(low_fence..=high_fence).contains(*v))
            .count();

        Some(Self {
            count: sorted.len(),
            min: sorted[0],
            q1,
            median: percentile_sorted(&sorted, 0.5),
            q3,
            max: sorted[sorted.len() - 1],
            mean: mean(sorted.iter().copied())?,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Equal-width histogram; `edges` has one more entry than `counts`.
///
/// The last bin is closed on the right. A constant sample is centred in a
/// unit-wide range so every bin has positive width.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if lo == hi { (lo - 0.5, hi + 0.5) } else { (lo, hi) };
        let width = (hi - lo) / bins as f64;

        let edges = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Some(Self { edges, counts })
    }
}
