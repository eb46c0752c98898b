use serde::Serialize;

use super::render::Renderer;
use crate::engine::pipeline::RunReport;
use crate::engine::types::{FactTable, HourlyFact};
use crate::engine::validate::ValidationReport;

pub struct JsonRenderer;

#[derive(Serialize)]
struct FactsResponse<'a> {
    count: usize,
    total: usize,
    rows: &'a [HourlyFact],
}

fn to_json_line<T: Serialize>(value: &T) -> Vec<u8> {
    let mut out = serde_json::to_vec_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e).into_bytes());
    out.push(b'\n');
    out
}

impl Renderer for JsonRenderer {
    fn render_facts(&self, facts: &FactTable, limit: usize) -> Vec<u8> {
        let shown = if limit == 0 { facts.len() } else { limit.min(facts.len()) };
        to_json_line(&FactsResponse {
            count: shown,
            total: facts.len(),
            rows: &facts.rows()[..shown],
        })
    }

    fn render_run(&self, report: &RunReport) -> Vec<u8> {
        to_json_line(report)
    }

    fn render_validation(&self, report: &ValidationReport) -> Vec<u8> {
        to_json_line(report)
    }
}
