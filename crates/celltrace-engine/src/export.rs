use celltrace_types::{Chemistry, HealthStatus, Session, TaskKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::aggregate::round_to;
use crate::classify::classify_reading;

/// Column headers of the tabular export, in order.
pub const EXPORT_HEADER: [&str; 11] = [
    "Timestamp",
    "Cell Name",
    "Type",
    "Voltage (V)",
    "Current (A)",
    "Temperature (°C)",
    "Capacity (Wh)",
    "SOC (%)",
    "Status",
    "Active Task",
    "Task Progress (%)",
];

/// Task reported alongside a row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActiveTask {
    pub kind: TaskKind,
    pub progress_pct: f64,
}

/// One exported (snapshot, reading) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub timestamp: DateTime<Utc>,
    pub cell_id: u32,
    pub cell_name: String,
    pub chemistry: Chemistry,
    pub voltage: f64,
    pub current: f64,
    pub temperature_c: f64,
    pub capacity_wh: f64,
    pub state_of_charge_pct: f64,
    pub status: HealthStatus,
    pub active_task: Option<ActiveTask>,
}

impl ExportRow {
    /// Cells in `EXPORT_HEADER` order. A missing task renders as `None` / `0`.
    ///
    /// Voltage, current and capacity are written to 2 decimals, temperature and
    /// SOC to 1, without trailing zeros.
    pub fn to_record(&self) -> [String; 11] {
        let (task, progress) = match &self.active_task {
            Some(task) => (task.kind.to_string(), task.progress_pct.to_string()),
            None => ("None".to_string(), "0".to_string()),
        };

        [
            self.timestamp.to_rfc3339(),
            self.cell_name.clone(),
            self.chemistry.to_string(),
            round_to(self.voltage, 2).to_string(),
            round_to(self.current, 2).to_string(),
            round_to(self.temperature_c, 1).to_string(),
            round_to(self.capacity_wh, 2).to_string(),
            round_to(self.state_of_charge_pct, 1).to_string(),
            self.status.to_string(),
            task,
            progress,
        ]
    }
}

/// Flatten a session into rows, snapshot order then reading order.
///
/// Each row is classified and annotated with the first running task of its
/// snapshot. If several tasks are marked running, only the earliest listed is
/// reported.
pub fn export_rows(session: &Session) -> Vec<ExportRow> {
    let mut rows = Vec::with_capacity(session.reading_count());

    for snapshot in session.snapshots() {
        let active_task = snapshot.active_task().map(|task| ActiveTask {
            kind: task.kind(),
            progress_pct: task.progress_pct,
        });

        for reading in &snapshot.readings {
            rows.push(ExportRow {
                timestamp: snapshot.taken_at,
                cell_id: reading.cell_id,
                cell_name: reading.name.clone(),
                chemistry: reading.chemistry,
                voltage: reading.voltage,
                current: reading.current,
                temperature_c: reading.temperature_c,
                capacity_wh: reading.capacity_wh,
                state_of_charge_pct: reading.state_of_charge_pct,
                status: classify_reading(reading),
                active_task,
            });
        }
    }

    rows
}

/// Write rows as a delimited table with the standard header.
pub fn write_csv<W: Write>(writer: W, rows: &[ExportRow]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(EXPORT_HEADER)?;
    for row in rows {
        wtr.write_record(row.to_record())?;
    }

    wtr.flush()?;
    Ok(())
}
