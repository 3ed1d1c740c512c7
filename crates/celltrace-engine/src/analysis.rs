use celltrace_types::{HealthStatus, Reading, Session, Severity};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::round_to;
use crate::classify::classify_reading;

/// Count of readings per severity bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
}

impl StatusDistribution {
    pub fn total(&self) -> usize {
        self.normal + self.warning + self.critical
    }
}

pub fn status_distribution(readings: &[Reading]) -> StatusDistribution {
    let mut dist = StatusDistribution::default();
    for reading in readings {
        match classify_reading(reading).severity() {
            Severity::Critical => dist.critical += 1,
            Severity::Warning => dist.warning += 1,
            Severity::Normal => dist.normal += 1,
        }
    }
    dist
}

/// A reading that needs operator attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub cell_name: String,
    pub voltage: f64,
    pub temperature_c: f64,
    pub status: HealthStatus,
    pub message: String,
}

impl Alert {
    pub fn severity(&self) -> Severity {
        self.status.severity()
    }
}

/// Critical and warning alerts for the given readings, in reading order.
pub fn collect_alerts(readings: &[Reading]) -> Vec<Alert> {
    readings
        .iter()
        .filter_map(|reading| {
            let status = classify_reading(reading);
            let message = match status.severity() {
                Severity::Critical => "Immediate attention required!",
                Severity::Warning => "Monitor closely",
                Severity::Normal => return None,
            };
            Some(Alert {
                cell_name: reading.name.clone(),
                voltage: reading.voltage,
                temperature_c: reading.temperature_c,
                status,
                message: message.to_string(),
            })
        })
        .collect()
}

/// Bank-level figures for the current set of cells.
///
/// Capacity is a total across cells, the rest are means.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BankOverview {
    pub total_cells: usize,
    pub mean_voltage: f64,
    pub mean_temperature_c: f64,
    pub total_capacity_wh: f64,
    pub mean_state_of_charge_pct: f64,
}

pub fn overview(readings: &[Reading]) -> BankOverview {
    if readings.is_empty() {
        return BankOverview::default();
    }

    let n = readings.len() as f64;

    BankOverview {
        total_cells: readings.len(),
        mean_voltage: round_to(sum_by(readings, |r| r.voltage) / n, 2),
        mean_temperature_c: round_to(sum_by(readings, |r| r.temperature_c) / n, 1),
        total_capacity_wh: round_to(sum_by(readings, |r| r.capacity_wh), 2),
        mean_state_of_charge_pct: round_to(sum_by(readings, |r| r.state_of_charge_pct) / n, 1),
    }
}

fn sum_by(readings: &[Reading], field: impl Fn(&Reading) -> f64) -> f64 {
    readings.iter().map(field).sum()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SocPoint {
    pub taken_at: DateTime<Utc>,
    pub mean_state_of_charge_pct: f64,
}

/// Mean SOC per snapshot; snapshots without readings plot as 0.
pub fn soc_timeline(session: &Session) -> Vec<SocPoint> {
    session
        .snapshots()
        .iter()
        .map(|snapshot| {
            let readings = &snapshot.readings;
            let mean = if readings.is_empty() {
                0.0
            } else {
                readings.iter().map(|r| r.state_of_charge_pct).sum::<f64>()
                    / readings.len() as f64
            };
            SocPoint {
                taken_at: snapshot.taken_at,
                mean_state_of_charge_pct: mean,
            }
        })
        .collect()
}
