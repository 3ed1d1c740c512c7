use celltrace_types::{ChemistrySpec, HealthStatus, Reading};

/// Temperature above which a reading is critical regardless of voltage.
pub const CRITICAL_TEMPERATURE_C: f64 = 45.0;
/// Temperature above which a reading is at least a warning.
pub const WARNING_TEMPERATURE_C: f64 = 40.0;

const CRITICAL_VOLTAGE_FACTOR: f64 = 1.1;
const WARNING_VOLTAGE_FACTOR: f64 = 1.2;
const HIGH_VOLTAGE_FACTOR: f64 = 0.9;

/// Classify a reading against a chemistry policy.
///
/// Checks short-circuit in severity order (Critical, Warning, High, Normal):
/// a hot cell near full charge is Critical, not High.
pub fn classify(reading: &Reading, spec: &ChemistrySpec) -> HealthStatus {
    let voltage = reading.voltage;
    let temperature = reading.temperature_c;

    if voltage <= spec.min_voltage * CRITICAL_VOLTAGE_FACTOR || temperature > CRITICAL_TEMPERATURE_C
    {
        HealthStatus::Critical
    } else if voltage <= spec.min_voltage * WARNING_VOLTAGE_FACTOR
        || temperature > WARNING_TEMPERATURE_C
    {
        HealthStatus::Warning
    } else if voltage >= spec.max_voltage * HIGH_VOLTAGE_FACTOR {
        HealthStatus::High
    } else {
        HealthStatus::Normal
    }
}

/// Classify a reading against the policy of its own chemistry.
pub fn classify_reading(reading: &Reading) -> HealthStatus {
    classify(reading, reading.chemistry.spec())
}
