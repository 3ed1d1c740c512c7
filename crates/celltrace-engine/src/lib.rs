// Engine module - classification, session recording and analysis
// Sits between the raw telemetry types and the CLI/runtime layers.
// Every function here is pure or append-only; nothing performs I/O except `write_csv`,
// which writes to a caller-supplied sink.

pub mod aggregate;
pub mod analysis;
pub mod classify;
pub mod compare;
pub mod export;
pub mod recorder;

pub use aggregate::{AggregateSummary, ReadingSource, aggregate, round_to};
pub use analysis::{
    Alert, BankOverview, SocPoint, StatusDistribution, collect_alerts, overview, soc_timeline,
    status_distribution,
};
pub use classify::{classify, classify_reading};
pub use compare::{Metric, MetricPair, SessionComparison, compare};
pub use export::{ActiveTask, EXPORT_HEADER, ExportRow, export_rows, write_csv};
pub use recorder::record;

use celltrace_types::{Reading, Session, SessionRecord};

// Façade API - stable entry points for the runtime and CLI layers

/// Aggregate summary of a persisted session, replayed from its snapshot log.
pub fn summarize_record(record: &SessionRecord) -> AggregateSummary {
    aggregate(&record.session)
}

/// Readings of the most recent snapshot, empty for a fresh session.
pub fn latest_readings(session: &Session) -> &[Reading] {
    session
        .latest()
        .map(|snapshot| snapshot.readings.as_slice())
        .unwrap_or(&[])
}
