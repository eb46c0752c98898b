pub mod report;
pub mod runner;


pub use report::{RunReport, RunStatus};
pub use runner::Pipeline;
