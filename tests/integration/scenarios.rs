use crate::integration::matcher::Matcher;
use serde::Deserialize;
use serde_json::Value;
use std::fs;

#[derive(Debug, Deserialize)]
pub struct TestScenario {
    pub name: String,
    /// Zone offset-qualified timestamps are converted into
    #[serde(default)]
    pub timezone: Option<String>,
    /// Successive runs against the same store
    pub runs: Vec<RunStep>,
}

#[derive(Debug, Deserialize)]
pub struct RunStep {
    #[serde(default)]
    pub spins: Vec<Value>,
    #[serde(default)]
    pub purchases: Vec<Value>,
    pub expect: Expectation,
}

#[derive(Debug, Deserialize)]
pub struct Expectation {
    /// "succeeded", "validation_failed" or "error"
    pub status: String,
    #[serde(default)]
    pub rejected_rows: Option<usize>,
    #[serde(default)]
    pub failed_checks: Option<Vec<String>>,
    /// Rows of the stored table after this run, in table order
    #[serde(default)]
    pub rows: Option<Vec<Value>>,
    /// Applied to the rendered report, or to the error message
    #[serde(default)]
    pub matchers: Vec<Matcher>,
}

pub fn load_scenarios_from_json(path: &str) -> Vec<TestScenario> {
    let content = fs::read_to_string(path).expect("Failed to read scenario file");
    serde_json::from_str(&content).expect("Invalid JSON format")
}
