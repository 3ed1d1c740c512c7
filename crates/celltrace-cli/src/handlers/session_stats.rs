use super::{color_enabled, print_json};
use crate::types::OutputFormat;
use crate::views::{SessionStatsView, SessionStatsViewModel};
use anyhow::{Context, Result};
use celltrace_runtime::SessionStore;

pub fn handle(store: &SessionStore, name: &str, format: OutputFormat) -> Result<()> {
    let record = store
        .load(name)
        .with_context(|| format!("Failed to load session {}", name))?;

    let stats = SessionStatsViewModel::from_record(&record);

    match format {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Plain => print!(
            "{}",
            SessionStatsView {
                stats: &stats,
                enable_color: color_enabled(),
            }
        ),
    }

    Ok(())
}
