use crate::engine::pipeline::RunReport;
use crate::engine::types::FactTable;
use crate::engine::validate::ValidationReport;

use super::json::JsonRenderer;
use super::table::TableRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            OutputFormat::Table => Box::new(TableRenderer),
            OutputFormat::Json => Box::new(JsonRenderer),
        }
    }
}

/// Serializes command results for the terminal. Timestamps always come out
/// in canonical `YYYY-MM-DD HH:MM:SS` form.
pub trait Renderer: Send + Sync {
    /// `limit` of 0 renders every row.
    fn render_facts(&self, facts: &FactTable, limit: usize) -> Vec<u8>;

    fn render_run(&self, report: &RunReport) -> Vec<u8>;

    fn render_validation(&self, report: &ValidationReport) -> Vec<u8>;
}
