use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::inputs::load_batch;
use super::open_store;
use crate::command::types::InputArgs;
use crate::engine::errors::PipelineError;
use crate::engine::pipeline::Pipeline;
use crate::shared::config::Settings;

pub async fn handle<W: AsyncWrite + Unpin>(
    args: &InputArgs,
    settings: &Settings,
    writer: &mut W,
) -> anyhow::Result<bool> {
    let batch = load_batch(&args.spins, &args.purchases, &settings.ingest)
        .await
        .map_err(|e| {
            let e = PipelineError::from(e);
            e.log_error();
            e
        })?;
    let store = open_store(args.store.as_deref(), settings)?;
    let pipeline = Pipeline::new(store, settings);

    let result = tokio::task::spawn_blocking(move || pipeline.validate(&batch)).await?;
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            e.log_error();
            return Err(e.into());
        }
    };

    let renderer = args.format.renderer();
    writer.write_all(&renderer.render_validation(&report)).await?;
    writer.flush().await?;
    Ok(report.is_success())
}
