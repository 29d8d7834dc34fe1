use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The `run.log` artifact: truncated at pipeline start, then appended one
/// timestamped line per event.
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Create (or truncate) the log file for a fresh run.
    pub fn create(path: &Path) -> Result<Self> {
        File::create(path)
            .with_context(|| format!("Failed to create run log at {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one `[<UTC timestamp>] message` line.
    pub fn line(&self, message: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open run log at {}", self.path.display()))?;
        writeln!(file, "[{}] {}", timestamp(), message)
            .with_context(|| format!("Failed to append to run log at {}", self.path.display()))?;
        Ok(())
    }

    /// Append the terminal `ERROR:` line for a failed run.
    pub fn error(&self, message: &str) -> Result<()> {
        self.line(&format!("ERROR: {}", message))
    }
}

/// RFC 3339 UTC with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
