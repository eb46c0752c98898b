use tokio::io::AsyncWrite;
use tracing::debug;

use crate::command::handlers::{run, show, validate};
use crate::command::types::Command;
use crate::shared::config::Settings;

/// Execute one command, writing its output to `writer`.
/// Returns whether the command succeeded from the operator's point of view.
pub async fn dispatch_command<W: AsyncWrite + Unpin>(
    cmd: &Command,
    settings: &Settings,
    writer: &mut W,
) -> anyhow::Result<bool> {
    debug!(target: "spin_facts::dispatch", command = ?cmd, "Dispatching command");

    match cmd {
        Command::Run(args) => run::handle(args, settings, writer).await,
        Command::Validate(args) => validate::handle(args, settings, writer).await,
        Command::Show(args) => show::handle(args, settings, writer).await,
    }
}
