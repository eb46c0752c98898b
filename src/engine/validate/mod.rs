pub mod check;
pub mod checks;
pub mod report;
pub mod suite;


pub use check::{Check, CheckOutcome, Offense, ValidationInput};
pub use report::ValidationReport;
pub use suite::ValidationSuite;
