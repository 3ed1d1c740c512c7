//! View models and plain-text views for CLI output.
//!
//! View models are `Serialize` so `--format json` prints them directly; the
//! `*View` wrappers render the same data as text, optionally colored.

use celltrace_engine::{
    AggregateSummary, Alert, BankOverview, SessionComparison, SocPoint, StatusDistribution,
    collect_alerts, latest_readings, overview, soc_timeline, status_distribution,
};
use celltrace_types::{
    BenchInfo, ChemistrySpec, SessionRecord, Severity, TaskKind, TaskRecord, TaskStatus,
};
use chrono::{DateTime, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;

const RULE_WIDTH: usize = 60;

#[derive(Debug, Serialize)]
pub struct TaskViewModel {
    pub id: u32,
    pub kind: TaskKind,
    pub status: TaskStatus,
    pub duration_seconds: u64,
    pub progress_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&TaskRecord> for TaskViewModel {
    fn from(task: &TaskRecord) -> Self {
        Self {
            id: task.id,
            kind: task.kind(),
            status: task.status,
            duration_seconds: task.duration_seconds,
            progress_pct: task.progress_pct,
            details: task.parameters.describe(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LatestSnapshotViewModel {
    pub taken_at: DateTime<Utc>,
    pub overview: BankOverview,
    pub distribution: StatusDistribution,
    pub alerts: Vec<Alert>,
}

#[derive(Debug, Serialize)]
pub struct SessionStatsViewModel {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub bench: BenchInfo,
    pub snapshot_count: usize,
    pub reading_count: usize,
    pub summary: AggregateSummary,
    pub latest: Option<LatestSnapshotViewModel>,
    pub tasks: Vec<TaskViewModel>,
    /// Mean SOC per snapshot; JSON output only.
    pub soc_timeline: Vec<SocPoint>,
}

impl SessionStatsViewModel {
    pub fn from_record(record: &SessionRecord) -> Self {
        let session = &record.session;
        let latest = session.latest().map(|snapshot| {
            let readings = latest_readings(session);
            LatestSnapshotViewModel {
                taken_at: snapshot.taken_at,
                overview: overview(readings),
                distribution: status_distribution(readings),
                alerts: collect_alerts(readings),
            }
        });

        Self {
            name: record.name.clone(),
            created_at: record.created_at,
            bench: record.bench.clone(),
            snapshot_count: session.len(),
            reading_count: session.reading_count(),
            summary: celltrace_engine::summarize_record(record),
            latest,
            tasks: record.tasks.iter().map(TaskViewModel::from).collect(),
            soc_timeline: soc_timeline(session),
        }
    }
}

pub struct SessionStatsView<'a> {
    pub stats: &'a SessionStatsViewModel,
    pub enable_color: bool,
}

impl fmt::Display for SessionStatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;

        writeln!(f, "{}", heading(&format!("SESSION {}", s.name), self.enable_color))?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f, "Created:          {}", s.created_at.to_rfc3339())?;
        writeln!(f, "Bench:            {}", bench_label(&s.bench))?;
        writeln!(f, "Snapshots:        {}", s.snapshot_count)?;
        writeln!(f, "Readings:         {}", s.reading_count)?;
        writeln!(f)?;

        writeln!(f, "{}", heading("SESSION AVERAGES", self.enable_color))?;
        writeln!(f, "Avg Voltage:      {:.2} V", s.summary.mean_voltage)?;
        writeln!(f, "Avg Temperature:  {:.1} °C", s.summary.mean_temperature_c)?;
        writeln!(f, "Avg SOC:          {:.1} %", s.summary.mean_state_of_charge_pct)?;
        writeln!(f, "Avg Capacity:     {:.2} Wh", s.summary.mean_capacity_wh)?;

        if let Some(latest) = &s.latest {
            let ov = &latest.overview;
            let dist = &latest.distribution;

            writeln!(f)?;
            writeln!(
                f,
                "{}",
                heading(
                    &format!("LATEST SNAPSHOT ({})", latest.taken_at.to_rfc3339()),
                    self.enable_color
                )
            )?;
            writeln!(f, "Total Cells:      {}", ov.total_cells)?;
            writeln!(f, "Avg Voltage:      {:.2} V", ov.mean_voltage)?;
            writeln!(f, "Avg Temperature:  {:.1} °C", ov.mean_temperature_c)?;
            writeln!(f, "Total Capacity:   {:.2} Wh", ov.total_capacity_wh)?;
            writeln!(f, "Avg SOC:          {:.1} %", ov.mean_state_of_charge_pct)?;
            writeln!(
                f,
                "Status:           normal {} / warning {} / critical {}",
                dist.normal, dist.warning, dist.critical
            )?;

            if !latest.alerts.is_empty() {
                writeln!(f)?;
                writeln!(f, "{}", heading("ALERTS", self.enable_color))?;
                for alert in &latest.alerts {
                    writeln!(f, "{}", AlertLine { alert, enable_color: self.enable_color })?;
                }
            }
        }

        if !s.tasks.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", heading("TASKS", self.enable_color))?;
            for task in &s.tasks {
                write!(
                    f,
                    "#{} {} {} {:.0}% ({}s)",
                    task.id,
                    task.kind,
                    task.status.to_string().to_uppercase(),
                    task.progress_pct,
                    task.duration_seconds
                )?;
                match &task.details {
                    Some(details) => writeln!(f, "  {}", details)?,
                    None => writeln!(f)?,
                }
            }
        }

        Ok(())
    }
}

struct AlertLine<'a> {
    alert: &'a Alert,
    enable_color: bool,
}

impl fmt::Display for AlertLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let a = self.alert;
        let tag = format!("[{}]", a.severity().to_string().to_uppercase());
        let tag = match (self.enable_color, a.severity()) {
            (true, Severity::Critical) => tag.red().bold().to_string(),
            (true, Severity::Warning) => tag.yellow().bold().to_string(),
            _ => tag,
        };

        write!(
            f,
            "{} {} {}: {}V, {}°C - {}",
            tag,
            a.status.icon(),
            a.cell_name,
            a.voltage,
            a.temperature_c,
            a.message
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ComparisonViewModel {
    pub current: String,
    pub previous: String,
    pub comparison: SessionComparison,
}

pub struct ComparisonView<'a> {
    pub model: &'a ComparisonViewModel,
    pub enable_color: bool,
}

impl fmt::Display for ComparisonView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.model;

        writeln!(f, "{}", heading("SESSION COMPARISON", self.enable_color))?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(
            f,
            "{:<14} {:>20} {:>20}",
            "Metric",
            truncate(&m.current, 20),
            truncate(&m.previous, 20)
        )?;

        for pair in m.comparison.metrics() {
            let label = format!("{} ({})", pair.metric, pair.metric.unit());
            writeln!(f, "{:<14} {:>20} {:>20}", label, pair.a, pair.b)?;
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct ChemistryViewModel {
    pub chemistries: Vec<&'static ChemistrySpec>,
}

impl fmt::Display for ChemistryViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<5} {:<24} {:>8} {:>8} {:>8} {:>8} {:>10}",
            "ID", "NAME", "NOMINAL", "MIN", "MAX", "CHARGE", "DISCHARGE"
        )?;
        for spec in &self.chemistries {
            writeln!(
                f,
                "{:<5} {:<24} {:>7.2}V {:>7.2}V {:>7.2}V {:>7}s {:>9}s",
                spec.id.as_str(),
                spec.display_name,
                spec.nominal_voltage,
                spec.min_voltage,
                spec.max_voltage,
                spec.charge_time_seconds,
                spec.discharge_time_seconds
            )?;
        }
        Ok(())
    }
}

fn heading(text: &str, enable_color: bool) -> String {
    if enable_color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn bench_label(bench: &BenchInfo) -> String {
    match (bench.name.is_empty(), bench.group.is_empty()) {
        (true, true) => "(unnamed)".to_string(),
        (false, true) => bench.name.clone(),
        (true, false) => format!("(unnamed) (group {})", bench.group),
        (false, false) => format!("{} (group {})", bench.name, bench.group),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let truncated: String = text.chars().take(max - 3).collect();
        format!("{}...", truncated)
    } else {
        text.to_string()
    }
}
