use crate::integration::scenarios::{Expectation, RunStep, TestScenario};
use serde_json::Value;
use spin_facts::command::handlers::inputs::load_batch;
use spin_facts::engine::errors::PipelineError;
use spin_facts::engine::persist::{FactSource, FileFactStore};
use spin_facts::engine::pipeline::{Pipeline, RunReport};
use spin_facts::shared::config::Settings;
use spin_facts::shared::response::{Renderer, TableRenderer};
use std::fs;
use std::path::Path;
use tempfile::tempdir;
use tracing::info;

const TOLERANCE: f64 = 1e-6;

pub fn run_scenario(scenario: &TestScenario) -> Result<(), String> {
    info!("▶ Running scenario: {}", scenario.name);
    let dir = tempdir().map_err(|e| e.to_string())?;

    let mut settings = Settings::default();
    settings.store.dir = dir.path().join("store").display().to_string();
    settings.ingest.timezone = scenario.timezone.clone();

    let store = FileFactStore::open(&settings.store.dir, settings.constraints.clone())
        .map_err(|e| e.to_string())?;
    let pipeline = Pipeline::new(store, &settings);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| e.to_string())?;

    for (i, step) in scenario.runs.iter().enumerate() {
        let outcome = execute_step(&runtime, &pipeline, &settings, dir.path(), i, step);
        check_step(&pipeline, step, outcome).map_err(|e| format!("run {}: {}", i + 1, e))?;
    }
    Ok(())
}

fn execute_step(
    runtime: &tokio::runtime::Runtime,
    pipeline: &Pipeline<FileFactStore>,
    settings: &Settings,
    dir: &Path,
    index: usize,
    step: &RunStep,
) -> Result<RunReport, String> {
    let spins = dir.join(format!("spins-{index}.json"));
    let purchases = dir.join(format!("purchases-{index}.json"));
    write_json(&spins, &step.spins)?;
    write_json(&purchases, &step.purchases)?;

    let batch = runtime
        .block_on(load_batch(&spins, &purchases, &settings.ingest))
        .map_err(|e| PipelineError::from(e).to_string())?;
    pipeline.run(batch).map_err(|e| e.to_string())
}

fn write_json(path: &Path, rows: &[Value]) -> Result<(), String> {
    let body = serde_json::to_string_pretty(rows).map_err(|e| e.to_string())?;
    fs::write(path, body).map_err(|e| e.to_string())
}

fn check_step(
    pipeline: &Pipeline<FileFactStore>,
    step: &RunStep,
    outcome: Result<RunReport, String>,
) -> Result<(), String> {
    let expect: &Expectation = &step.expect;
    let output = match (&outcome, expect.status.as_str()) {
        (Ok(report), "succeeded") if report.is_success() => rendered(report),
        (Ok(report), "validation_failed") if !report.is_success() => rendered(report),
        (Err(message), "error") => message.clone(),
        (Ok(report), wanted) => {
            return Err(format!("expected {wanted}, got report:\n{}", rendered(report)));
        }
        (Err(message), wanted) => return Err(format!("expected {wanted}, got error: {message}")),
    };

    if let (Ok(report), Some(want)) = (&outcome, expect.rejected_rows) {
        if report.rejected_rows != want {
            return Err(format!("rejected_rows = {}, expected {want}", report.rejected_rows));
        }
    }

    if let (Ok(report), Some(want)) = (&outcome, &expect.failed_checks) {
        let failed: Vec<&str> = report.validation.failed().map(|o| o.name).collect();
        if failed != want.iter().map(String::as_str).collect::<Vec<_>>() {
            return Err(format!("failed checks {failed:?}, expected {want:?}"));
        }
    }

    for matcher in &expect.matchers {
        if !matcher.matches(&output) {
            return Err(format!("matcher {matcher:?} did not match:\n{output}"));
        }
    }

    if let Some(want) = &expect.rows {
        let table = pipeline.store().load().map_err(|e| e.to_string())?;
        let actual: Vec<Value> = table
            .iter()
            .map(|row| serde_json::to_value(row).map_err(|e| e.to_string()))
            .collect::<Result<_, _>>()?;
        compare_rows(&actual, want)?;
    }
    Ok(())
}

fn rendered(report: &RunReport) -> String {
    String::from_utf8_lossy(&TableRenderer.render_run(report)).into_owned()
}

fn compare_rows(actual: &[Value], expected: &[Value]) -> Result<(), String> {
    if actual.len() != expected.len() {
        return Err(format!(
            "{} rows stored, expected {}: {}",
            actual.len(),
            expected.len(),
            Value::from(actual.to_vec())
        ));
    }
    for (i, (got, want)) in actual.iter().zip(expected).enumerate() {
        let Some(fields) = want.as_object() else {
            return Err(format!("expected row {i} is not an object"));
        };
        for (field, want_value) in fields {
            let got_value = &got[field.as_str()];
            if !values_match(got_value, want_value) {
                return Err(format!(
                    "row {i} field {field}: got {got_value}, expected {want_value} (row {got})"
                ));
            }
        }
    }
    Ok(())
}

fn values_match(got: &Value, want: &Value) -> bool {
    match (got.as_f64(), want.as_f64()) {
        (Some(g), Some(w)) => (g - w).abs() <= TOLERANCE,
        _ => got == want,
    }
}
