use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Supported cell chemistries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chemistry {
    #[serde(rename = "LFP")]
    Lfp,
    #[serde(rename = "NMC")]
    Nmc,
    #[serde(rename = "LCO")]
    Lco,
}

impl Chemistry {
    pub const ALL: [Chemistry; 3] = [Chemistry::Lfp, Chemistry::Nmc, Chemistry::Lco];

    pub fn as_str(&self) -> &'static str {
        match self {
            Chemistry::Lfp => "LFP",
            Chemistry::Nmc => "NMC",
            Chemistry::Lco => "LCO",
        }
    }

    /// Threshold policy for this chemistry
    pub fn spec(&self) -> &'static ChemistrySpec {
        match self {
            Chemistry::Lfp => &POLICY_TABLE[0],
            Chemistry::Nmc => &POLICY_TABLE[1],
            Chemistry::Lco => &POLICY_TABLE[2],
        }
    }
}

impl fmt::Display for Chemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chemistry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "LFP" => Ok(Chemistry::Lfp),
            "NMC" => Ok(Chemistry::Nmc),
            "LCO" => Ok(Chemistry::Lco),
            other => Err(Error::UnknownChemistry(other.to_string())),
        }
    }
}

/// Voltage and timing policy for one chemistry.
///
/// Invariant: `min_voltage < nominal_voltage < max_voltage`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemistrySpec {
    pub id: Chemistry,
    pub display_name: &'static str,
    pub nominal_voltage: f64,
    pub min_voltage: f64,
    pub max_voltage: f64,
    pub charge_time_seconds: u32,
    pub discharge_time_seconds: u32,
}

impl ChemistrySpec {
    /// Clamp a raw voltage into `[min_voltage, max_voltage]`.
    pub fn clamp_voltage(&self, voltage: f64) -> f64 {
        voltage.clamp(self.min_voltage, self.max_voltage)
    }

    /// Percentage of the usable voltage window, always within `[0, 100]`.
    pub fn state_of_charge(&self, voltage: f64) -> f64 {
        let range = self.max_voltage - self.min_voltage;
        let fraction = (self.clamp_voltage(voltage) - self.min_voltage) / range;
        fraction.clamp(0.0, 1.0) * 100.0
    }
}

pub static POLICY_TABLE: [ChemistrySpec; 3] = [
    ChemistrySpec {
        id: Chemistry::Lfp,
        display_name: "Lithium Iron Phosphate",
        nominal_voltage: 3.2,
        min_voltage: 2.8,
        max_voltage: 3.6,
        charge_time_seconds: 90,
        discharge_time_seconds: 180,
    },
    ChemistrySpec {
        id: Chemistry::Nmc,
        display_name: "Nickel Manganese Cobalt",
        nominal_voltage: 3.6,
        min_voltage: 3.2,
        max_voltage: 4.0,
        charge_time_seconds: 120,
        discharge_time_seconds: 240,
    },
    ChemistrySpec {
        id: Chemistry::Lco,
        display_name: "Lithium Cobalt Oxide",
        nominal_voltage: 3.8,
        min_voltage: 3.0,
        max_voltage: 4.2,
        charge_time_seconds: 100,
        discharge_time_seconds: 200,
    },
];

/// Look up the policy for a chemistry id such as `"LFP"`.
pub fn lookup(chemistry_id: &str) -> Result<&'static ChemistrySpec> {
    let chemistry: Chemistry = chemistry_id.parse()?;
    Ok(chemistry.spec())
}
