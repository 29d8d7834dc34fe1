use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use serde::Serialize;
use std::path::Path;

use crate::grading::{GradeStatus, ScoreOutcome, Statistics};
use crate::params::ExamParams;

/// The machine-readable `summary.json` model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub students: u32,
    pub scores_count: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub final_score: f64,
    pub status: GradeStatus,
    pub exam_date: String,
    pub pass_threshold: f64,
    pub bonus_applied: bool,
    pub bonus_points: f64,
}

impl Summary {
    /// Assemble the summary from the run's computed values. `min`/`max`
    /// come from the score statistics, the final score is rounded to two
    /// decimals, and `bonus_points` reads 0 when no bonus was applied.
    pub fn build(params: &ExamParams, stats: &Statistics, outcome: &ScoreOutcome) -> Self {
        Self {
            students: 1,
            scores_count: stats.count,
            average: stats.average,
            min: stats.min,
            max: stats.max,
            final_score: round2(outcome.final_score),
            status: outcome.status,
            exam_date: params.exam_date.format("%Y-%m-%d").to_string(),
            pass_threshold: params.pass_threshold,
            bonus_applied: params.has_bonus,
            bonus_points: if params.has_bonus {
                params.bonus_points
            } else {
                0.0
            },
        }
    }
}

/// Write `summary.json` pretty-printed, committed atomically so a crashed
/// run never leaves a truncated artifact for CI to archive.
pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    serde_json::to_writer_pretty(&mut file, summary).context("Failed to serialize summary")?;
    file.commit()
        .with_context(|| format!("Failed to save summary at {}", path.display()))?;
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
