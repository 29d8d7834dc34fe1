use chrono::NaiveDate;
use serde::Serialize;

/// Exam parameters exactly as submitted by the CI job, before validation.
///
/// Everything except `has_bonus` is kept as text; interpretation and
/// range checking happen in [`crate::grading::validate_params`]. The
/// camelCase serde names make the run log's `Params` line match the
/// parameter names an operator configured.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawParams {
    pub student_name: String,
    pub student_id: String,
    pub scores: String,
    pub exam_date: String,
    pub has_bonus: bool,
    pub bonus_points: String,
    pub pass_threshold: String,
}

impl RawParams {
    /// Read parameters from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read parameters through a lookup function, which keeps the reader
    /// testable without mutating process-global state.
    ///
    /// Absent values fall back to defaults, and so do blank ones: CI
    /// servers submit untouched parameter fields as empty strings, which
    /// must behave like unset variables. `HAS_BONUS` is true only for a
    /// case-insensitive `"true"`. Reading never fails; bad input is the
    /// validator's problem.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            student_name: get("STUDENT_NAME").unwrap_or_default(),
            student_id: get("STUDENT_ID").unwrap_or_default(),
            scores: get("SCORES").unwrap_or_default(),
            exam_date: get("EXAM_DATE").unwrap_or_default(),
            has_bonus: get("HAS_BONUS")
                .map(|value| value.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            bonus_points: get("BONUS_POINTS").unwrap_or_else(|| "0".to_string()),
            pass_threshold: get("PASS_THRESHOLD").unwrap_or_else(|| "60".to_string()),
        }
    }
}

/// Validated, fully typed exam parameters for one pipeline run.
///
/// Produced only by [`crate::grading::validate_params`]; `scores` holds at
/// least two values, each within 0..=100, in the order they were given.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamParams {
    pub student_name: String,
    pub student_id: String,
    pub scores: Vec<f64>,
    pub exam_date: NaiveDate,
    pub has_bonus: bool,
    pub bonus_points: f64,
    pub pass_threshold: f64,
}
