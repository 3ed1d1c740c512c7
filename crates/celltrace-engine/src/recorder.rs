use celltrace_types::{Reading, Session, SessionSnapshot, TaskRecord};
use chrono::{DateTime, Utc};

/// Append a snapshot of the given readings and tasks, returning the extended session.
///
/// Readings are not classified here; callers classify at export or render time.
pub fn record(
    mut session: Session,
    readings: Vec<Reading>,
    tasks: Vec<TaskRecord>,
    taken_at: DateTime<Utc>,
) -> Session {
    log::debug!(
        "recording snapshot #{} at {} ({} readings, {} tasks)",
        session.len() + 1,
        taken_at,
        readings.len(),
        tasks.len()
    );

    session.append(SessionSnapshot {
        taken_at,
        readings,
        tasks,
    });
    session
}
