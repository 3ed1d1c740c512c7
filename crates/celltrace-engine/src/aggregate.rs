use celltrace_types::{Reading, Session, SessionSnapshot};
use serde::{Deserialize, Serialize};

/// Mean telemetry values over a set of readings.
///
/// Voltage and capacity carry 2 decimal places, temperature and SOC carry 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub mean_voltage: f64,
    pub mean_temperature_c: f64,
    pub mean_state_of_charge_pct: f64,
    pub mean_capacity_wh: f64,
}

impl AggregateSummary {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Anything that can be flattened into an ordered stream of readings.
///
/// Snapshot logs yield readings in snapshot order, then reading order within
/// each snapshot.
pub trait ReadingSource {
    fn readings(&self) -> impl Iterator<Item = &Reading>;
}

impl ReadingSource for [Reading] {
    fn readings(&self) -> impl Iterator<Item = &Reading> {
        self.iter()
    }
}

impl ReadingSource for Vec<Reading> {
    fn readings(&self) -> impl Iterator<Item = &Reading> {
        self.iter()
    }
}

impl ReadingSource for [SessionSnapshot] {
    fn readings(&self) -> impl Iterator<Item = &Reading> {
        self.iter().flat_map(|snapshot| snapshot.readings.iter())
    }
}

impl ReadingSource for Vec<SessionSnapshot> {
    fn readings(&self) -> impl Iterator<Item = &Reading> {
        self.as_slice().readings()
    }
}

impl ReadingSource for Session {
    fn readings(&self) -> impl Iterator<Item = &Reading> {
        self.snapshots().readings()
    }
}

#[derive(Default)]
struct Totals {
    count: usize,
    voltage: f64,
    temperature_c: f64,
    state_of_charge_pct: f64,
    capacity_wh: f64,
}

impl Totals {
    fn add(&mut self, reading: &Reading) {
        self.count += 1;
        self.voltage += reading.voltage;
        self.temperature_c += reading.temperature_c;
        self.state_of_charge_pct += reading.state_of_charge_pct;
        self.capacity_wh += reading.capacity_wh;
    }
}

/// Reading-weighted means over every reading in `input`.
///
/// A snapshot holding more cells contributes more to the mean. Empty input
/// yields the zero summary. Rounding is applied once, to the final means.
pub fn aggregate<S: ReadingSource + ?Sized>(input: &S) -> AggregateSummary {
    let mut totals = Totals::default();
    for reading in input.readings() {
        totals.add(reading);
    }

    if totals.count == 0 {
        return AggregateSummary::zero();
    }

    let n = totals.count as f64;
    AggregateSummary {
        mean_voltage: round_to(totals.voltage / n, 2),
        mean_temperature_c: round_to(totals.temperature_c / n, 1),
        mean_state_of_charge_pct: round_to(totals.state_of_charge_pct / n, 1),
        mean_capacity_wh: round_to(totals.capacity_wh / n, 2),
    }
}

/// Round to `places` decimal places, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
