use chrono::NaiveDate;
use thiserror::Error;

use super::scores::parse_scores;
use crate::params::{ExamParams, RawParams};

/// One variant per validation rule, in check order. The Display text is
/// the operator-facing message, naming the environment variable and the
/// rule that it broke.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("STUDENT_NAME must be at least 2 characters.")]
    NameTooShort,
    #[error("STUDENT_ID must be 5-12 digits.")]
    BadStudentId,
    #[error("EXAM_DATE must be in YYYY-MM-DD format.")]
    BadDateFormat,
    #[error("EXAM_DATE is not a valid date.")]
    InvalidDate,
    #[error("SCORES is required (e.g., 90,78,100).")]
    ScoresMissing,
    #[error("SCORES contains invalid number: '{segment}'.")]
    ScoreNotNumeric { segment: String },
    #[error("SCORES must contain at least 2 numbers.")]
    TooFewScores,
    #[error("Each score must be between 0 and 100 (got {value}).")]
    ScoreOutOfRange { value: f64 },
    #[error("BONUS_POINTS must be a number between 0 and 20.")]
    BadBonusPoints,
    #[error("PASS_THRESHOLD must be a number between 0 and 100.")]
    BadPassThreshold,
}

/// Run the ordered validation chain over the raw parameters, stopping at
/// the first violation. Success returns the fully typed [`ExamParams`];
/// every numeric field is parsed here with an explicit error, never
/// coerced through NaN.
pub fn validate_params(raw: &RawParams) -> Result<ExamParams, ValidationError> {
    let student_name = raw.student_name.trim();
    if student_name.chars().count() < 2 {
        return Err(ValidationError::NameTooShort);
    }

    let id_len = raw.student_id.len();
    if !(5..=12).contains(&id_len)
        || !raw.student_id.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ValidationError::BadStudentId);
    }

    let exam_date = parse_exam_date(&raw.exam_date)?;

    if raw.scores.trim().is_empty() {
        return Err(ValidationError::ScoresMissing);
    }
    let scores = parse_scores(&raw.scores)?;
    if scores.len() < 2 {
        return Err(ValidationError::TooFewScores);
    }
    if let Some(&value) = scores.iter().find(|s| !(0.0..=100.0).contains(*s)) {
        return Err(ValidationError::ScoreOutOfRange { value });
    }

    let bonus_points = parse_in_range(&raw.bonus_points, 0.0, 20.0)
        .ok_or(ValidationError::BadBonusPoints)?;
    let pass_threshold = parse_in_range(&raw.pass_threshold, 0.0, 100.0)
        .ok_or(ValidationError::BadPassThreshold)?;

    Ok(ExamParams {
        student_name: student_name.to_string(),
        student_id: raw.student_id.clone(),
        scores,
        exam_date,
        has_bonus: raw.has_bonus,
        bonus_points,
        pass_threshold,
    })
}

/// Check the literal `YYYY-MM-DD` shape first (its own error), then let
/// chrono decide whether the date exists on the calendar.
fn parse_exam_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(ValidationError::BadDateFormat);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)
}

fn parse_in_range(raw: &str, min: f64, max: f64) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && (min..=max).contains(v))
}
