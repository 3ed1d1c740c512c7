use serde::{Deserialize, Serialize};
use std::fmt;

/// Health classification of a single reading.
///
/// Always derived from a reading and its chemistry, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Critical,
    Warning,
    High,
    Normal,
}

/// Alert severity bucket. `High` readings share the `Normal` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "Critical",
            HealthStatus::Warning => "Warning",
            HealthStatus::High => "High",
            HealthStatus::Normal => "Normal",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "🚨",
            HealthStatus::Warning => "⚠️",
            HealthStatus::High => "🔋",
            HealthStatus::Normal => "🟢",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            HealthStatus::Critical => Severity::Critical,
            HealthStatus::Warning => Severity::Warning,
            HealthStatus::High | HealthStatus::Normal => Severity::Normal,
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Normal => write!(f, "normal"),
            Severity::Warning => write!(f, "warning"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}
