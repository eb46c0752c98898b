use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::open_store;
use crate::command::types::ShowArgs;
use crate::engine::persist::FactSource;
use crate::shared::config::Settings;

pub async fn handle<W: AsyncWrite + Unpin>(
    args: &ShowArgs,
    settings: &Settings,
    writer: &mut W,
) -> anyhow::Result<bool> {
    let store = open_store(args.store.as_deref(), settings)?;
    let facts = tokio::task::spawn_blocking(move || store.load()).await??;

    let renderer = args.format.renderer();
    writer
        .write_all(&renderer.render_facts(&facts, args.limit))
        .await?;
    writer.flush().await?;
    Ok(true)
}
