use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Charge/discharge task attached to a bench. Read-only metadata for analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: u32,
    pub duration_seconds: u64,
    #[serde(default)]
    pub progress_pct: f64,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub parameters: TaskParameters,
}

impl TaskRecord {
    /// New pending task with zero progress.
    pub fn pending(id: u32, duration_seconds: u64, parameters: TaskParameters) -> Self {
        Self {
            id,
            duration_seconds,
            progress_pct: 0.0,
            status: TaskStatus::Pending,
            started_at: None,
            ended_at: None,
            parameters,
        }
    }

    pub fn kind(&self) -> TaskKind {
        self.parameters.kind()
    }

    pub fn is_running(&self) -> bool {
        self.status == TaskStatus::Running
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Running => write!(f, "running"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    #[serde(rename = "CC_CV")]
    CcCv,
    #[serde(rename = "IDLE")]
    Idle,
    #[serde(rename = "CC_CD")]
    CcCd,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::CcCv => "CC_CV",
            TaskKind::Idle => "IDLE",
            TaskKind::CcCd => "CC_CD",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific task parameters, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TaskParameters {
    /// Constant current, then constant voltage charge.
    #[serde(rename = "CC_CV")]
    CcCv {
        cc_cp_value: String,
        cv_voltage: f64,
        current: f64,
        capacity: f64,
    },
    #[serde(rename = "IDLE")]
    Idle,
    /// Constant current discharge.
    #[serde(rename = "CC_CD")]
    CcCd {
        cc_cp_value: String,
        discharge_voltage: f64,
        capacity: f64,
    },
}

impl TaskParameters {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskParameters::CcCv { .. } => TaskKind::CcCv,
            TaskParameters::Idle => TaskKind::Idle,
            TaskParameters::CcCd { .. } => TaskKind::CcCd,
        }
    }

    /// One-line parameter description, `None` for idle tasks.
    pub fn describe(&self) -> Option<String> {
        match self {
            TaskParameters::CcCv {
                cc_cp_value,
                cv_voltage,
                ..
            } => Some(format!("CC/CP: {}, CV: {}V", cc_cp_value, cv_voltage)),
            TaskParameters::CcCd {
                cc_cp_value,
                discharge_voltage,
                ..
            } => Some(format!(
                "CC/CP: {}, Voltage: {}V",
                cc_cp_value, discharge_voltage
            )),
            TaskParameters::Idle => None,
        }
    }
}
