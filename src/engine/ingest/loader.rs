use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

use crate::engine::errors::IngestError;

/// Read a JSON array or JSON-lines file of raw records.
pub async fn load_records<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<Vec<T>, IngestError> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;
    let records = parse_records(&content)?;
    debug!(path = %path.display(), count = records.len(), "Loaded raw records");
    Ok(records)
}

/// A leading `[` selects array mode; anything else is one object per line.
pub fn parse_records<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, IngestError> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| IngestError::JsonLine {
                line: idx + 1,
                source,
            })
        })
        .collect()
}
