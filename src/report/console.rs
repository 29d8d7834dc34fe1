use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;

use crate::grading::{GradeStatus, ScoreOutcome, Statistics};
use crate::params::ExamParams;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format the outcome block printed after a successful run.
pub fn format_outcome(
    params: &ExamParams,
    stats: &Statistics,
    outcome: &ScoreOutcome,
    use_colors: bool,
) -> String {
    let student_line = format!(
        "Student: {} ({}), exam {}",
        params.student_name,
        params.student_id,
        params.exam_date.format("%Y-%m-%d")
    );
    let stats_line = format!(
        "Scores: {} tests, avg {:.2}, min {}, max {}, std dev {:.2}",
        stats.count, stats.average, stats.min, stats.max, stats.std_dev
    );

    if use_colors {
        let status = match outcome.status {
            GradeStatus::Pass => format!("{}", "PASS".green().bold()),
            GradeStatus::Fail => format!("{}", "FAIL".red().bold()),
        };
        format!(
            "{}\n{}\nFinal score: {} (threshold {}) -> {}",
            student_line,
            stats_line,
            format!("{:.2}", outcome.final_score).bold(),
            params.pass_threshold,
            status
        )
    } else {
        format!(
            "{}\n{}\nFinal score: {:.2} (threshold {}) -> {}",
            student_line, stats_line, outcome.final_score, params.pass_threshold, outcome.status
        )
    }
}

/// Format the per-test score table shown in verbose mode.
pub fn format_score_table(scores: &[f64]) -> String {
    scores
        .iter()
        .enumerate()
        .map(|(i, score)| format!("  Test {:>2}  {:>6}", i + 1, score))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the artifact confirmation lines.
pub fn format_artifacts(out_dir: &Path) -> String {
    format!(
        "Artifacts written to {}:\n  {}\n  {}\n  {}",
        out_dir.display(),
        out_dir.join("run.log").display(),
        out_dir.join("summary.json").display(),
        out_dir.join("report.html").display()
    )
}
