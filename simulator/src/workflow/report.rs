use crate::workflow::runner::WorkflowResult;
use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Appends one JSON line describing the run to `path`, creating parent
/// directories as needed.
pub fn append_report(path: &Path, result: &WorkflowResult) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
    }
    let line = serde_json::to_string(result).context("serializing workflow result")?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report {}", path.display()))?;
    writeln!(file, "{line}").with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}
