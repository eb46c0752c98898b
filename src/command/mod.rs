pub mod dispatcher;
pub mod handlers;
pub mod types;

pub use types::{Cli, Command};
