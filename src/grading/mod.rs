pub mod policy;
pub mod scores;
pub mod stats;
pub mod validate;

pub use policy::{grade, GradeStatus, ScoreOutcome};
pub use scores::parse_scores;
pub use stats::Statistics;
pub use validate::{validate_params, ValidationError};
