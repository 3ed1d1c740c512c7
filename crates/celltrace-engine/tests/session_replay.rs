use celltrace_engine::{
    Metric, aggregate, compare, export_rows, latest_readings, record, status_distribution,
    write_csv,
};
use celltrace_types::{
    CellConfig, CellSample, Chemistry, Reading, Session, TaskParameters, TaskRecord, TaskStatus,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn tick(cells: &[CellConfig], samples: &[(f64, f64, f64)], at: DateTime<Utc>) -> Vec<Reading> {
    cells
        .iter()
        .zip(samples)
        .map(|(cell, &(voltage, current, temperature_c))| {
            let sample = CellSample {
                voltage,
                current,
                temperature_c,
            };
            Reading::from_sample(cell, sample, at).expect("valid sample")
        })
        .collect()
}

fn task(id: u32, parameters: TaskParameters, status: TaskStatus, progress: f64) -> TaskRecord {
    let mut task = TaskRecord::pending(id, 300, parameters);
    task.status = status;
    task.progress_pct = progress;
    task
}

fn charge() -> TaskParameters {
    TaskParameters::CcCv {
        cc_cp_value: "2A".to_string(),
        cv_voltage: 3.6,
        current: 1.0,
        capacity: 2.5,
    }
}

fn discharge() -> TaskParameters {
    TaskParameters::CcCd {
        cc_cp_value: "2A".to_string(),
        discharge_voltage: 2.8,
        capacity: 2.5,
    }
}

// Two ticks; the bank grows from two to three cells between them.
fn session_a() -> Session {
    let t1 = t0() + Duration::seconds(3);
    let two = CellConfig::bank(2, Chemistry::Lfp);
    let three = CellConfig::bank(3, Chemistry::Lfp);

    let session = record(
        Session::new(),
        tick(&two, &[(3.30, 0.8, 30.0), (3.10, 0.9, 41.0)], t0()),
        vec![task(1, charge(), TaskStatus::Running, 25.0)],
        t0(),
    );
    record(
        session,
        tick(
            &three,
            &[(3.40, 0.75, 31.0), (3.70, 1.0, 46.5), (2.90, 0.5, 28.0)],
            t1,
        ),
        vec![
            task(1, charge(), TaskStatus::Completed, 100.0),
            task(2, discharge(), TaskStatus::Running, 10.0),
        ],
        t1,
    )
}

fn session_b() -> Session {
    let one = CellConfig::bank(1, Chemistry::Lfp);
    let two = CellConfig::bank(2, Chemistry::Lfp);

    let session = record(
        Session::new(),
        tick(&one, &[(3.20, 1.0, 26.0)], t0()),
        vec![],
        t0(),
    );
    record(
        session,
        tick(&two, &[(3.25, 1.3, 27.5), (3.35, 1.1, 29.0)], t0() + Duration::seconds(3)),
        vec![],
        t0() + Duration::seconds(3),
    )
}

#[test]
fn test_session_summary_is_reading_weighted() {
    let summary = aggregate(&session_a());
    insta::assert_json_snapshot!("session_a_summary", summary);
}

#[test]
fn test_session_comparison() {
    let a = session_a();
    let b = session_b();

    let comparison = compare(&a, &b).expect("both sessions have readings");
    assert_eq!(comparison.get(Metric::Voltage), (3.26, 3.27));
    assert_eq!(compare(&b, &a).unwrap(), comparison.swapped());

    insta::assert_json_snapshot!("session_a_vs_b", comparison);
}

#[test]
fn test_session_export_csv() {
    let session = session_a();
    let rows = export_rows(&session);
    assert_eq!(rows.len(), session.reading_count());

    let mut buf = Vec::new();
    write_csv(&mut buf, &rows).expect("write csv");
    let csv = String::from_utf8(buf).expect("utf-8 csv");

    insta::assert_snapshot!("session_a_csv", csv);
}

#[test]
fn test_latest_snapshot_distribution() {
    let session = session_a();
    let dist = status_distribution(latest_readings(&session));

    assert_eq!(dist.normal, 1);
    assert_eq!(dist.warning, 0);
    assert_eq!(dist.critical, 2);
}

#[test]
fn test_replay_from_json_is_deterministic() {
    let session = session_a();
    let json = serde_json::to_string(&session).expect("serialize session");
    let replayed: Session = serde_json::from_str(&json).expect("deserialize session");

    assert_eq!(aggregate(&replayed), aggregate(&session));
    assert_eq!(export_rows(&replayed), export_rows(&session));
}
