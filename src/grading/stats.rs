use serde::Serialize;

/// Descriptive statistics over one validated score set.
///
/// Recomputed fresh each run; serializes camelCase so the run log's
/// `Stats` line is machine-readable JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub average: f64,
    pub std_dev: f64,
}

impl Statistics {
    /// Compute count, extrema, sum, average, and population standard
    /// deviation (divisor n, not n-1) over a non-empty score slice.
    ///
    /// The validator guarantees at least 2 scores before this is called.
    pub fn compute(scores: &[f64]) -> Self {
        let count = scores.len();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &score in scores {
            min = min.min(score);
            max = max.max(score);
            sum += score;
        }
        let average = sum / count as f64;
        let variance = scores
            .iter()
            .map(|&score| (score - average).powi(2))
            .sum::<f64>()
            / count as f64;
        Self {
            count,
            min,
            max,
            sum,
            average,
            std_dev: variance.sqrt(),
        }
    }
}
