use super::{color_enabled, print_json};
use crate::types::OutputFormat;
use crate::views::{ComparisonView, ComparisonViewModel};
use anyhow::{Context, Result};
use celltrace_runtime::SessionStore;

pub fn handle(
    store: &SessionStore,
    current: &str,
    previous: &str,
    format: OutputFormat,
) -> Result<()> {
    let current_record = store
        .load(current)
        .with_context(|| format!("Failed to load session {}", current))?;
    let previous_record = store
        .load(previous)
        .with_context(|| format!("Failed to load session {}", previous))?;

    let comparison = celltrace_engine::compare(&current_record.session, &previous_record.session)
        .with_context(|| format!("Cannot compare {} with {}", current, previous))?;

    let model = ComparisonViewModel {
        current: current_record.name,
        previous: previous_record.name,
        comparison,
    };

    match format {
        OutputFormat::Json => print_json(&model)?,
        OutputFormat::Plain => print!(
            "{}",
            ComparisonView {
                model: &model,
                enable_color: color_enabled(),
            }
        ),
    }

    Ok(())
}
