use crate::{Config, Error, Result};
use celltrace_engine::{SessionComparison, compare, record};
use celltrace_types::{
    BenchInfo, CellConfig, CellSample, Reading, Session, SessionRecord, TaskRecord,
};
use chrono::{DateTime, Utc};

/// Monitoring context for one bench: owns the active session and threads it
/// through the recorder on every tick.
///
/// A single writer is assumed; callers with several producers must serialize
/// calls to [`BenchMonitor::ingest`].
#[derive(Debug, Clone, Default)]
pub struct BenchMonitor {
    bench: BenchInfo,
    cells: Vec<CellConfig>,
    tasks: Vec<TaskRecord>,
    current: Vec<Reading>,
    session: Session,
    previous: Option<Session>,
}

impl BenchMonitor {
    pub fn new(bench: BenchInfo) -> Self {
        Self {
            bench,
            ..Self::default()
        }
    }

    /// Monitor for the bench configured in the workspace.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.bench.clone())
    }

    pub fn bench(&self) -> &BenchInfo {
        &self.bench
    }

    pub fn cells(&self) -> &[CellConfig] {
        &self.cells
    }

    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// Replace the cell bank. Current readings are cleared; history is kept.
    pub fn configure_cells(&mut self, cells: Vec<CellConfig>) {
        self.cells = cells;
        self.current.clear();
    }

    pub fn set_tasks(&mut self, tasks: Vec<TaskRecord>) {
        self.tasks = tasks;
    }

    /// Build readings for one tick and append them as a snapshot.
    ///
    /// `samples` pair up with the configured cells in order. Any malformed
    /// sample rejects the whole tick and nothing is recorded.
    pub fn ingest(
        &mut self,
        samples: &[CellSample],
        taken_at: DateTime<Utc>,
    ) -> Result<&[Reading]> {
        if samples.len() != self.cells.len() {
            return Err(Error::InvalidOperation(format!(
                "expected {} samples, got {}",
                self.cells.len(),
                samples.len()
            )));
        }

        let readings = self
            .cells
            .iter()
            .zip(samples)
            .map(|(cell, sample)| Reading::from_sample(cell, *sample, taken_at))
            .collect::<std::result::Result<Vec<_>, _>>()
            .inspect_err(|err| log::warn!("rejected tick at {}: {}", taken_at, err))?;

        let session = std::mem::take(&mut self.session);
        self.session = record(session, readings.clone(), self.tasks.clone(), taken_at);
        self.current = readings;

        Ok(&self.current)
    }

    /// Readings from the most recent accepted tick.
    pub fn current_readings(&self) -> &[Reading] {
        &self.current
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hold a previously recorded session for comparison.
    pub fn load_previous(&mut self, record: SessionRecord) {
        log::debug!(
            "loaded previous session {} ({} snapshots)",
            record.name,
            record.session.len()
        );
        self.previous = Some(record.session);
    }

    pub fn previous(&self) -> Option<&Session> {
        self.previous.as_ref()
    }

    /// Compare the active session (side `a`) with the previous one (side `b`).
    pub fn compare_with_previous(&self) -> Result<SessionComparison> {
        let previous = self.previous.as_ref().ok_or_else(|| {
            Error::InvalidOperation("no previous session loaded for comparison".to_string())
        })?;
        Ok(compare(&self.session, previous)?)
    }

    /// Snapshot the monitoring context as a persisted record.
    pub fn to_record(&self, name: Option<String>, created_at: DateTime<Utc>) -> SessionRecord {
        SessionRecord {
            name: name.unwrap_or_else(|| SessionRecord::default_name(created_at)),
            created_at,
            bench: self.bench.clone(),
            cells: self.cells.clone(),
            tasks: self.tasks.clone(),
            session: self.session.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celltrace_types::{Chemistry, TaskParameters, TaskStatus};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn sample(voltage: f64, temperature_c: f64) -> CellSample {
        CellSample {
            voltage,
            current: 1.0,
            temperature_c,
        }
    }

    fn monitor() -> BenchMonitor {
        let mut monitor = BenchMonitor::new(BenchInfo {
            name: "Bench-A".to_string(),
            group: "G1".to_string(),
        });
        monitor.configure_cells(CellConfig::bank(2, Chemistry::Lfp));
        monitor
    }

    #[test]
    fn test_ingest_records_snapshot_with_tasks() -> Result<()> {
        let mut monitor = monitor();
        let mut task = TaskRecord::pending(1, 300, TaskParameters::Idle);
        task.status = TaskStatus::Running;
        monitor.set_tasks(vec![task]);

        let readings = monitor.ingest(&[sample(3.2, 25.0), sample(3.3, 26.0)], t0())?;
        assert_eq!(readings.len(), 2);

        let snapshot = monitor.session().latest().unwrap();
        assert_eq!(snapshot.taken_at, t0());
        assert_eq!(snapshot.tasks.len(), 1);
        assert_eq!(monitor.current_readings()[1].name, "Cell_2");
        Ok(())
    }

    #[test]
    fn test_malformed_tick_is_not_recorded() -> Result<()> {
        let mut monitor = monitor();
        monitor.ingest(&[sample(3.2, 25.0), sample(3.3, 26.0)], t0())?;

        let err = monitor
            .ingest(
                &[sample(3.2, 25.0), sample(f64::NAN, 26.0)],
                t0() + Duration::seconds(3),
            )
            .unwrap_err();

        assert!(matches!(err, Error::Telemetry(_)));
        assert_eq!(monitor.session().len(), 1);
        assert_eq!(monitor.current_readings()[0].taken_at, t0());
        Ok(())
    }

    #[test]
    fn test_sample_count_must_match_cells() {
        let mut monitor = monitor();
        let err = monitor.ingest(&[sample(3.2, 25.0)], t0()).unwrap_err();
        assert!(matches!(err, Error::InvalidOperation(_)));
        assert!(monitor.session().is_empty());
    }

    #[test]
    fn test_compare_with_previous() -> Result<()> {
        let mut earlier = monitor();
        earlier.ingest(&[sample(3.2, 25.0), sample(3.4, 27.0)], t0())?;
        let previous = earlier.to_record(None, t0());
        assert_eq!(previous.name, "Session_20250301_120000");

        let mut monitor = monitor();
        assert!(monitor.compare_with_previous().is_err());

        monitor.load_previous(previous);
        let err = monitor.compare_with_previous().unwrap_err();
        assert!(matches!(
            err,
            Error::Telemetry(celltrace_types::Error::EmptyInput(_))
        ));

        monitor.ingest(&[sample(3.5, 30.0), sample(3.5, 30.0)], t0())?;
        let comparison = monitor.compare_with_previous()?;
        assert_eq!(comparison.a.mean_voltage, 3.5);
        assert_eq!(comparison.b.mean_voltage, 3.3);
        Ok(())
    }

    #[test]
    fn test_record_carries_bench_identity() {
        let monitor = monitor();
        let record = monitor.to_record(Some("run-1".to_string()), t0());

        assert_eq!(record.name, "run-1");
        assert_eq!(record.bench.group, "G1");
        assert_eq!(record.cells.len(), 2);
    }

    #[test]
    fn test_from_config_uses_configured_bench() {
        let mut config = Config::default();
        config.set_bench("Rig B", "12");

        let monitor = BenchMonitor::from_config(&config);
        let record = monitor.to_record(None, t0());
        assert_eq!(record.bench.name, "Rig B");
        assert_eq!(record.bench.group, "12");
    }
}
