//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchFailure {
    /// Transient; the worker is alive but behind.
    QueueFull,
    Disconnected,
}

impl DispatchFailure {
    pub fn reason(self) -> &'static str {
        match self {
            Self::QueueFull => "UI command queue is full; please retry",
            Self::Disconnected => {
                "Backend command processor disconnected (possible startup/runtime failure)"
            }
        }
    }
}

/// Queues a command for the backend worker. On failure the command is handed
/// back so the caller can unwind any state it already changed.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), (BackendCommand, DispatchFailure)> {
    let cmd_name = cmd.name();
    tracing::debug!(command = cmd_name, "queueing ui->backend command");
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(cmd)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue is full");
            Err((cmd, DispatchFailure::QueueFull))
        }
        Err(TrySendError::Disconnected(cmd)) => {
            tracing::error!(command = cmd_name, "ui->backend command queue disconnected");
            Err((cmd, DispatchFailure::Disconnected))
        }
    }
}
