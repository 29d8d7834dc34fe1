//! gradecard: turns one student's exam parameters into a grade report.
//!
//! The pipeline is strictly sequential: read the environment, validate,
//! compute statistics, apply the grading policy, write the artifacts
//! (`run.log`, `summary.json`, `report.html`).

pub mod browser;
pub mod grading;
pub mod params;
pub mod report;
