use super::render::Renderer;
use crate::engine::pipeline::RunReport;
use crate::engine::types::{FactTable, HourlyFact};
use crate::engine::validate::ValidationReport;
use crate::shared::datetime::format_canonical;

const COLUMNS: [&str; 8] = [
    "date",
    "user_id",
    "country",
    "total_spins",
    "total_revenue",
    "total_purchases",
    "avg_revenue_per_purchase",
    "total_daily_revenue",
];

/// Aligned plain-text columns.
pub struct TableRenderer;

fn cells(row: &HourlyFact) -> [String; 8] {
    [
        format_canonical(row.hour),
        row.user_id.clone(),
        row.country.clone().unwrap_or_else(|| "NULL".to_string()),
        row.total_spins.to_string(),
        format!("{:.2}", row.total_revenue),
        row.total_purchases.to_string(),
        format!("{:.2}", row.avg_revenue_per_purchase),
        format!("{:.2}", row.total_daily_revenue),
    ]
}

impl Renderer for TableRenderer {
    fn render_facts(&self, facts: &FactTable, limit: usize) -> Vec<u8> {
        let shown = if limit == 0 { facts.len() } else { limit.min(facts.len()) };
        let rows: Vec<[String; 8]> = facts.iter().take(shown).map(cells).collect();

        let mut widths = COLUMNS.map(str::len);
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.len());
            }
        }

        let mut out = String::new();
        let line = |out: &mut String, values: &[&str]| {
            let padded: Vec<String> = values
                .iter()
                .zip(widths)
                .map(|(v, w)| format!("{v:<w$}"))
                .collect();
            out.push_str(padded.join("  ").trim_end());
            out.push('\n');
        };

        line(&mut out, &COLUMNS);
        for row in &rows {
            let refs: Vec<&str> = row.iter().map(String::as_str).collect();
            line(&mut out, &refs);
        }
        if shown < facts.len() {
            out.push_str(&format!("({} of {} rows)\n", shown, facts.len()));
        } else {
            out.push_str(&format!("({} rows)\n", facts.len()));
        }
        out.into_bytes()
    }

    fn render_run(&self, report: &RunReport) -> Vec<u8> {
        report.to_string().into_bytes()
    }

    fn render_validation(&self, report: &ValidationReport) -> Vec<u8> {
        report.to_string().into_bytes()
    }
}
