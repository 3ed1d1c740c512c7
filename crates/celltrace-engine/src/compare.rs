use celltrace_types::{Error, Result, Session};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aggregate::{AggregateSummary, ReadingSource, aggregate};

/// Metrics reported by a session comparison, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Voltage,
    Temperature,
    #[serde(rename = "SOC")]
    Soc,
    Capacity,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Voltage,
        Metric::Temperature,
        Metric::Soc,
        Metric::Capacity,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Voltage => "Voltage",
            Metric::Temperature => "Temperature",
            Metric::Soc => "SOC",
            Metric::Capacity => "Capacity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Voltage => "V",
            Metric::Temperature => "°C",
            Metric::Soc => "%",
            Metric::Capacity => "Wh",
        }
    }

    pub fn value(&self, summary: &AggregateSummary) -> f64 {
        match self {
            Metric::Voltage => summary.mean_voltage,
            Metric::Temperature => summary.mean_temperature_c,
            Metric::Soc => summary.mean_state_of_charge_pct,
            Metric::Capacity => summary.mean_capacity_wh,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One metric from both sides of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPair {
    pub metric: Metric,
    pub a: f64,
    pub b: f64,
}

/// Paired aggregate summaries of two sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionComparison {
    pub a: AggregateSummary,
    pub b: AggregateSummary,
}

impl SessionComparison {
    /// Same values with sides exchanged.
    pub fn swapped(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
        }
    }

    pub fn metrics(&self) -> [MetricPair; 4] {
        Metric::ALL.map(|metric| MetricPair {
            metric,
            a: metric.value(&self.a),
            b: metric.value(&self.b),
        })
    }

    pub fn get(&self, metric: Metric) -> (f64, f64) {
        (metric.value(&self.a), metric.value(&self.b))
    }
}

/// Compare two sessions metric by metric.
///
/// Each side is aggregated independently over its full snapshot log. Fails
/// with `EmptyInput` when either side holds no readings, since an all-zero
/// side would be indistinguishable from real data.
pub fn compare(a: &Session, b: &Session) -> Result<SessionComparison> {
    ensure_has_readings(a, "first")?;
    ensure_has_readings(b, "second")?;

    Ok(SessionComparison {
        a: aggregate(a),
        b: aggregate(b),
    })
}

fn ensure_has_readings(session: &Session, side: &str) -> Result<()> {
    if session.readings().next().is_none() {
        return Err(Error::EmptyInput(format!("{} session has no readings", side)));
    }
    Ok(())
}
