use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chemistry::Chemistry;
use crate::error::{Error, Result};

/// A configured cell in the bench.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellConfig {
    pub id: u32,
    pub name: String,
    pub chemistry: Chemistry,
}

impl CellConfig {
    pub fn new(id: u32, name: impl Into<String>, chemistry: Chemistry) -> Self {
        Self {
            id,
            name: name.into(),
            chemistry,
        }
    }

    /// Bank of `count` cells named `Cell_1..Cell_n`, all of one chemistry.
    pub fn bank(count: u32, chemistry: Chemistry) -> Vec<CellConfig> {
        (1..=count)
            .map(|id| CellConfig::new(id, format!("Cell_{}", id), chemistry))
            .collect()
    }
}

/// Raw values acquired for one cell on one tick, before derivation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSample {
    pub voltage: f64,
    pub current: f64,
    pub temperature_c: f64,
}

/// One cell's instantaneous state.
///
/// `capacity_wh` is `voltage * current` (a power proxy, not integrated energy).
/// `voltage` holds the value clamped into the chemistry's window, so
/// `state_of_charge_pct` is always within `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub cell_id: u32,
    pub name: String,
    pub chemistry: Chemistry,
    pub voltage: f64,
    pub current: f64,
    pub temperature_c: f64,
    pub capacity_wh: f64,
    pub state_of_charge_pct: f64,
    pub taken_at: DateTime<Utc>,
}

impl Reading {
    /// Build a reading from a raw sample, rejecting values that cannot enter a session.
    pub fn from_sample(
        cell: &CellConfig,
        sample: CellSample,
        taken_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_sample(&cell.name, &sample)?;

        let spec = cell.chemistry.spec();
        let voltage = spec.clamp_voltage(sample.voltage);

        Ok(Self {
            cell_id: cell.id,
            name: cell.name.clone(),
            chemistry: cell.chemistry,
            voltage,
            current: sample.current,
            temperature_c: sample.temperature_c,
            capacity_wh: voltage * sample.current,
            state_of_charge_pct: spec.state_of_charge(voltage),
            taken_at,
        })
    }

    /// Check a stored reading against the invariants `from_sample` establishes.
    ///
    /// Used for readings that arrive already derived, such as an imported record.
    pub fn validate(&self) -> Result<()> {
        let malformed = |reason: String| Error::MalformedReading {
            cell: self.name.clone(),
            reason,
        };
        let spec = self.chemistry.spec();

        if !self.voltage.is_finite()
            || self.voltage < spec.min_voltage
            || self.voltage > spec.max_voltage
        {
            return Err(malformed(format!(
                "voltage {} outside the {} window [{}, {}]",
                self.voltage, self.chemistry, spec.min_voltage, spec.max_voltage
            )));
        }
        if !self.current.is_finite() || self.current < 0.0 {
            return Err(malformed(format!(
                "current {} must be a finite, non-negative number",
                self.current
            )));
        }
        if !self.temperature_c.is_finite() {
            return Err(malformed("temperature must be a finite number".to_string()));
        }
        if !self.capacity_wh.is_finite() || self.capacity_wh < 0.0 {
            return Err(malformed(format!(
                "capacity {} must be a finite, non-negative number",
                self.capacity_wh
            )));
        }
        if !(0.0..=100.0).contains(&self.state_of_charge_pct) {
            return Err(malformed(format!(
                "state of charge {} outside [0, 100]",
                self.state_of_charge_pct
            )));
        }

        Ok(())
    }
}

fn validate_sample(cell: &str, sample: &CellSample) -> Result<()> {
    let malformed = |reason: &str| Error::MalformedReading {
        cell: cell.to_string(),
        reason: reason.to_string(),
    };

    if !sample.voltage.is_finite() || sample.voltage < 0.0 {
        return Err(malformed("voltage must be a finite, non-negative number"));
    }
    if !sample.current.is_finite() || sample.current < 0.0 {
        return Err(malformed("current must be a finite, non-negative number"));
    }
    if !sample.temperature_c.is_finite() {
        return Err(malformed("temperature must be a finite number"));
    }

    Ok(())
}
