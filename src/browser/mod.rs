use anyhow::{Context, Result};
use std::path::Path;

/// Open the generated HTML report in the user's default browser.
pub fn open_report(path: &Path) -> Result<()> {
    let target = path
        .canonicalize()
        .with_context(|| format!("Report not found at {}", path.display()))?;
    webbrowser::open(&target.to_string_lossy())
        .with_context(|| format!("Failed to open browser for {}", target.display()))?;
    Ok(())
}
