pub mod inputs;
pub mod run;
pub mod show;
pub mod validate;

#[cfg(test)]
mod run_tests;

use std::path::{Path, PathBuf};

use crate::engine::errors::PersistenceError;
use crate::engine::persist::FileFactStore;
use crate::shared::config::Settings;

/// Open the store named on the command line, or the configured one.
pub(crate) fn open_store(
    overridden: Option<&Path>,
    settings: &Settings,
) -> Result<FileFactStore, PersistenceError> {
    let root = overridden
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&settings.store.dir));
    FileFactStore::open(root, settings.constraints.clone())
}
