use crate::command::handlers::run;
use crate::command::types::InputArgs;
use crate::engine::persist::{FactSource, FileFactStore};
use crate::shared::config::{ConstraintConfig, Settings};
use crate::shared::response::OutputFormat;
use indoc::indoc;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_inputs(dir: &Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let spins = dir.join("spins.json");
    let purchases = dir.join("purchases.jsonl");
    fs::write(
        &spins,
        r#"[{"date": "2022-04-01 10:00:00", "user_id": "U1", "country": "US", "total_spins": 5}]"#,
    )
    .unwrap();
    fs::write(
        &purchases,
        indoc! {r#"
            {"transaction_id": "T1", "date": "2022-04-01 10:16:26", "user_id": "U1", "revenue": 3.0, "currency": "USD"}
            {"transaction_id": "T2", "date": "2022-04-01 14:02:00", "user_id": "U1", "revenue": "2.00", "currency": "USD"}
            {"transaction_id": "T3", "date": "not a date", "user_id": "U1", "revenue": 9.0}
        "#},
    )
    .unwrap();
    (spins, purchases)
}

#[tokio::test]
async fn run_writes_table_and_reports_success() {
    let dir = tempdir().unwrap();
    let (spins, purchases) = write_inputs(dir.path());
    let store_dir = dir.path().join("store");
    let args = InputArgs {
        spins,
        purchases,
        store: Some(store_dir.clone()),
        format: OutputFormat::Json,
    };
    let mut out: Vec<u8> = Vec::new();

    let ok = run::handle(&args, &Settings::default(), &mut out).await.unwrap();

    assert!(ok);
    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["status"], "succeeded");
    assert_eq!(report["rows_written"], 2);
    assert_eq!(report["rejected_rows"], 1);
    assert_eq!(report["rejections"][0]["stream"], "purchases");

    let store = FileFactStore::open(&store_dir, ConstraintConfig::default()).unwrap();
    assert_eq!(store.load().unwrap().len(), 2);
}

#[tokio::test]
async fn run_fails_on_missing_input() {
    let dir = tempdir().unwrap();
    let args = InputArgs {
        spins: dir.path().join("nope.json"),
        purchases: dir.path().join("nope.jsonl"),
        store: Some(dir.path().join("store")),
        format: OutputFormat::Table,
    };
    let mut out: Vec<u8> = Vec::new();

    let result = run::handle(&args, &Settings::default(), &mut out).await;

    assert!(result.is_err());
    assert!(out.is_empty());
}
