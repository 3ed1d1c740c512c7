use crate::{Error, Result};
use celltrace_types::SessionRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store of persisted session records, one JSON file per session.
pub struct SessionStore {
    root: PathBuf,
}

impl SessionStore {
    /// Store rooted at `<workspace>/sessions`.
    pub fn in_workspace(workspace: &Path) -> Self {
        Self::new(workspace.join("sessions"))
    }

    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a record, replacing any session with the same name.
    pub fn save(&self, record: &SessionRecord) -> Result<PathBuf> {
        let path = self.path_for(&record.name)?;
        fs::create_dir_all(&self.root)?;

        let json = serde_json::to_string_pretty(record)?;
        fs::write(&path, json)?;

        log::info!(
            "saved session {} ({} snapshots) to {}",
            record.name,
            record.session.len(),
            path.display()
        );
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<SessionRecord> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(Error::NotFound(name.to_string()));
        }
        read_record(&path)
    }

    /// Stored session names, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(Error::InvalidOperation(format!(
                "invalid session name: {:?}",
                name
            )));
        }
        Ok(self.root.join(format!("{}.json", name)))
    }
}

/// Read a persisted session record from any path.
///
/// Readings are validated after parsing; a record holding a malformed
/// reading is rejected whole.
pub fn read_record(path: &Path) -> Result<SessionRecord> {
    let content = fs::read_to_string(path)?;
    let record: SessionRecord = serde_json::from_str(&content)?;
    record.validate()?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use celltrace_types::{
        BenchInfo, CellConfig, CellSample, Chemistry, Reading, Session, SessionSnapshot,
    };
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn record(name: &str) -> SessionRecord {
        SessionRecord {
            name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            bench: BenchInfo {
                name: "Bench-A".to_string(),
                group: "G1".to_string(),
            },
            cells: CellConfig::bank(2, Chemistry::Nmc),
            tasks: vec![],
            session: Session::new(),
        }
    }

    #[test]
    fn test_save_and_load_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SessionStore::in_workspace(temp_dir.path());

        let path = store.save(&record("Session_20250301_120000"))?;
        assert!(path.ends_with("sessions/Session_20250301_120000.json"));

        let loaded = store.load("Session_20250301_120000")?;
        assert_eq!(loaded, record("Session_20250301_120000"));

        Ok(())
    }

    #[test]
    fn test_list_is_sorted_and_ignores_other_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SessionStore::in_workspace(temp_dir.path());

        store.save(&record("b-run"))?;
        store.save(&record("a-run"))?;
        fs::write(store.root().join("notes.txt"), "ignored")?;

        assert_eq!(store.list()?, vec!["a-run", "b-run"]);
        Ok(())
    }

    #[test]
    fn test_list_missing_root_is_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SessionStore::in_workspace(temp_dir.path());
        assert!(store.list()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_missing_session() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SessionStore::in_workspace(temp_dir.path());

        let err = store.load("nope").unwrap_err();
        assert!(matches!(err, Error::NotFound(ref name) if name == "nope"));
        Ok(())
    }

    #[test]
    fn test_read_record_rejects_malformed_reading() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let taken_at = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let cell = CellConfig::new(1, "Cell_1", Chemistry::Nmc);
        let sample = CellSample {
            voltage: 3.7,
            current: 1.0,
            temperature_c: 25.0,
        };

        let mut reading = Reading::from_sample(&cell, sample, taken_at)?;
        reading.voltage = 9.0;
        reading.current = -4.0;

        let mut bad = record("bad");
        bad.session.append(SessionSnapshot {
            taken_at,
            readings: vec![reading],
            tasks: vec![],
        });

        let path = temp_dir.path().join("bad.json");
        fs::write(&path, serde_json::to_string(&bad)?)?;

        let err = read_record(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::Telemetry(celltrace_types::Error::MalformedReading { ref cell, .. }) if cell == "Cell_1"
        ));
        Ok(())
    }

    #[test]
    fn test_rejects_path_like_names() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let store = SessionStore::in_workspace(temp_dir.path());

        assert!(matches!(
            store.load("../escape"),
            Err(Error::InvalidOperation(_))
        ));
        Ok(())
    }
}
