//! Core data model for celltrace.
//!
//! Chemistries and their threshold policy, per-cell readings, charge/discharge
//! task metadata, and the append-only session log with its persisted record.

pub mod chemistry;
pub mod error;
pub mod reading;
pub mod session;
pub mod status;
pub mod task;

pub use chemistry::{Chemistry, ChemistrySpec, POLICY_TABLE, lookup};
pub use error::{Error, Result};
pub use reading::{CellConfig, CellSample, Reading};
pub use session::{BenchInfo, Session, SessionRecord, SessionSnapshot};
pub use status::{HealthStatus, Severity};
pub use task::{TaskKind, TaskParameters, TaskRecord, TaskStatus};
