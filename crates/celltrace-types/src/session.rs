use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::reading::{CellConfig, Reading};
use crate::task::TaskRecord;

/// One timestamped capture of every cell reading plus the task list at that moment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub taken_at: DateTime<Utc>,
    pub readings: Vec<Reading>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl SessionSnapshot {
    /// First task in list order whose status is running.
    pub fn active_task(&self) -> Option<&TaskRecord> {
        self.tasks.iter().find(|task| task.is_running())
    }
}

/// Chronologically ordered, append-only log of snapshots.
///
/// Insertion order is chronological order. Snapshots are never reordered,
/// deduplicated or removed once recorded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
    snapshots: Vec<SessionSnapshot>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from a previously persisted snapshot log.
    pub fn from_snapshots(snapshots: Vec<SessionSnapshot>) -> Self {
        Self { snapshots }
    }

    pub fn append(&mut self, snapshot: SessionSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn snapshots(&self) -> &[SessionSnapshot] {
        &self.snapshots
    }

    pub fn latest(&self) -> Option<&SessionSnapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Total readings across all snapshots.
    pub fn reading_count(&self) -> usize {
        self.snapshots.iter().map(|s| s.readings.len()).sum()
    }
}

/// Bench identity attached to a persisted session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchInfo {
    pub name: String,
    pub group: String,
}

impl BenchInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.group.is_empty()
    }
}

/// Persisted form of a monitoring run, sufficient to replay any summary or export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub bench: BenchInfo,
    pub cells: Vec<CellConfig>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    pub session: Session,
}

impl SessionRecord {
    /// Conventional session name derived from its creation time.
    pub fn default_name(created_at: DateTime<Utc>) -> String {
        format!("Session_{}", created_at.format("%Y%m%d_%H%M%S"))
    }

    /// Validate every reading of every snapshot; the first malformed one wins.
    pub fn validate(&self) -> Result<()> {
        self.session
            .snapshots()
            .iter()
            .flat_map(|snapshot| &snapshot.readings)
            .try_for_each(Reading::validate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::Chemistry;
    use crate::reading::CellSample;
    use crate::task::{TaskParameters, TaskStatus};
    use chrono::TimeZone;

    fn task(id: u32, status: TaskStatus) -> TaskRecord {
        let mut task = TaskRecord::pending(id, 60, TaskParameters::Idle);
        task.status = status;
        task
    }

    #[test]
    fn test_active_task_is_first_running() {
        let snapshot = SessionSnapshot {
            taken_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            readings: vec![],
            tasks: vec![
                task(1, TaskStatus::Completed),
                task(2, TaskStatus::Running),
                task(3, TaskStatus::Running),
            ],
        };

        assert_eq!(snapshot.active_task().map(|t| t.id), Some(2));
    }

    #[test]
    fn test_active_task_none_when_nothing_running() {
        let snapshot = SessionSnapshot {
            taken_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            readings: vec![],
            tasks: vec![task(1, TaskStatus::Pending)],
        };

        assert!(snapshot.active_task().is_none());
    }

    #[test]
    fn test_default_name_uses_creation_time() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 7).unwrap();
        assert_eq!(SessionRecord::default_name(created), "Session_20250301_090507");
    }

    #[test]
    fn test_record_validate_reports_malformed_reading() {
        let taken_at = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let cells = CellConfig::bank(1, Chemistry::Lfp);
        let sample = CellSample {
            voltage: 3.2,
            current: 1.0,
            temperature_c: 25.0,
        };
        let good = Reading::from_sample(&cells[0], sample, taken_at).unwrap();
        let mut bad = good.clone();
        bad.state_of_charge_pct = 775.0;

        let mut record = SessionRecord {
            name: "run".to_string(),
            created_at: taken_at,
            bench: BenchInfo::default(),
            cells,
            tasks: vec![],
            session: Session::from_snapshots(vec![SessionSnapshot {
                taken_at,
                readings: vec![good],
                tasks: vec![],
            }]),
        };
        assert!(record.validate().is_ok());

        record.session.append(SessionSnapshot {
            taken_at,
            readings: vec![bad],
            tasks: vec![],
        });
        assert!(matches!(
            record.validate(),
            Err(crate::Error::MalformedReading { .. })
        ));
    }

    #[test]
    fn test_session_serializes_as_snapshot_list() {
        let mut session = Session::new();
        session.append(SessionSnapshot {
            taken_at: Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap(),
            readings: vec![],
            tasks: vec![],
        });

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);

        let back: Session = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }
}
