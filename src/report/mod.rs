pub mod console;
pub mod html;
pub mod log;
pub mod summary;

pub use html::write_html_report;
pub use log::RunLog;
pub use summary::{write_summary, Summary};
