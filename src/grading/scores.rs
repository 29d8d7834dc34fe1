use super::validate::ValidationError;

/// Parse a comma-delimited score string into an ordered list of numbers.
///
/// Segments are trimmed and empty segments are dropped, so
/// `" 90, 78 ,100 "` and `"90,,78,100"` both parse cleanly. Input order is
/// preserved; the report's per-test table is positional. Range checking is
/// not done here - the validator applies it to this function's output.
pub fn parse_scores(raw: &str) -> Result<Vec<f64>, ValidationError> {
    raw.split(',')
        .map(|segment| segment.trim())
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| ValidationError::ScoreNotNumeric {
                    segment: segment.to_string(),
                })
        })
        .collect()
}
