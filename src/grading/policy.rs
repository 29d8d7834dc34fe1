use serde::Serialize;
use std::fmt;

use super::stats::Statistics;
use crate::params::ExamParams;

/// PASS/FAIL classification; serializes and displays in the upper-case
/// wire form used by summary.json and the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GradeStatus {
    Pass,
    Fail,
}

impl fmt::Display for GradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeStatus::Pass => write!(f, "PASS"),
            GradeStatus::Fail => write!(f, "FAIL"),
        }
    }
}

/// The graded result of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub final_score: f64,
    pub status: GradeStatus,
}

/// Apply the grading policy: average plus bonus (when enabled), clamped
/// at 100 on the high side only, then classified against the threshold.
/// The threshold boundary is inclusive: a final score exactly equal to
/// the threshold passes.
pub fn grade(stats: &Statistics, params: &ExamParams) -> ScoreOutcome {
    let bonus = if params.has_bonus {
        params.bonus_points
    } else {
        0.0
    };
    let final_score = (stats.average + bonus).min(100.0);
    let status = if final_score >= params.pass_threshold {
        GradeStatus::Pass
    } else {
        GradeStatus::Fail
    };
    ScoreOutcome {
        final_score,
        status,
    }
}
