use anyhow::{Context, Result};
use celltrace_engine::{export_rows, write_csv};
use celltrace_runtime::{Config, SessionStore};
use chrono::Utc;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

pub fn handle(
    store: &SessionStore,
    config: &Config,
    name: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let record = store
        .load(name)
        .with_context(|| format!("Failed to load session {}", name))?;

    let rows = export_rows(&record.session);
    if rows.is_empty() {
        log::warn!("session {} has no readings; writing header only", name);
    }

    let path = output.unwrap_or_else(|| default_output_path(config));
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let file = File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(BufWriter::new(file), &rows)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Exported {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn default_output_path(config: &Config) -> PathBuf {
    let file_name = format!("battery_monitoring_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));
    match &config.export.directory {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celltrace_runtime::ExportConfig;

    #[test]
    fn test_default_output_path_uses_export_directory() {
        let config = Config {
            export: ExportConfig {
                directory: Some(PathBuf::from("/tmp/exports")),
            },
            ..Config::default()
        };

        let path = default_output_path(&config);
        assert!(path.starts_with("/tmp/exports"));

        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap();
        assert!(file_name.starts_with("battery_monitoring_"));
        assert!(file_name.ends_with(".csv"));
        assert_eq!(file_name.len(), "battery_monitoring_20250301_120000.csv".len());
    }

    #[test]
    fn test_default_output_path_without_directory() {
        let path = default_output_path(&Config::default());
        assert_eq!(path.components().count(), 1);
    }
}
