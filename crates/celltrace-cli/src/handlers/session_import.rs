use anyhow::{Context, Result};
use celltrace_runtime::{Config, SessionStore, read_record};
use std::path::Path;

pub fn handle(
    store: &SessionStore,
    config: &Config,
    file: &Path,
    name: Option<String>,
) -> Result<()> {
    let mut record =
        read_record(file).with_context(|| format!("Failed to read {}", file.display()))?;

    if let Some(name) = name {
        record.name = name;
    }
    if record.bench.is_empty() && !config.bench.is_empty() {
        log::debug!("record {} has no bench; using configured bench", record.name);
        record.bench = config.bench.clone();
    }

    let path = store.save(&record)?;
    println!(
        "Imported session {} ({} snapshots, {} readings) to {}",
        record.name,
        record.session.len(),
        record.session.reading_count(),
        path.display()
    );
    Ok(())
}
