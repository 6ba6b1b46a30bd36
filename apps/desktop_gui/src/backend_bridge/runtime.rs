//! Runtime bridge between UI command queue and backend event intake.
//!
//! Every command runs as its own task, so requests overlap and may finish
//! out of order. Whichever listing lands last is what the board shows.

use std::thread::{self, JoinHandle};

use client_core::ResolutionRepository;
use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::domain::ResolutionId;
use tracing::{debug, error, info, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{PersistOperation, UiEvent};

pub fn launch(
    repository: ResolutionRepository,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("radar-backend".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!("failed to build backend runtime: {err}");
                    return;
                }
            };

            info!("backend worker ready");
            runtime.block_on(async move {
                while let Ok(cmd) = cmd_rx.recv() {
                    let repository = repository.clone();
                    let ui_tx = ui_tx.clone();
                    tokio::spawn(async move {
                        for event in execute_command(&repository, cmd).await {
                            forward_event(&ui_tx, event);
                        }
                    });
                }
                info!("command queue closed; backend worker stopping");
            });
        })
}

fn forward_event(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => warn!("ui event queue is full; dropping backend event"),
        Err(TrySendError::Disconnected(_)) => debug!("ui event receiver gone; dropping event"),
    }
}

/// Runs one command against the repository and returns the events the UI
/// should see, in order.
pub async fn execute_command(repository: &ResolutionRepository, cmd: BackendCommand) -> Vec<UiEvent> {
    match cmd {
        BackendCommand::Refresh => vec![refresh(repository).await],
        BackendCommand::Save { draft, editing_id } => {
            let (operation, result) = match &editing_id {
                Some(id) => (PersistOperation::Update, repository.update(id, &draft).await),
                None => (PersistOperation::Create, repository.create(&draft).await),
            };
            let mut events = Vec::with_capacity(2);
            if let Err(err) = result {
                events.push(persist_failed(operation, editing_id.as_ref(), err.message()));
            }
            events.push(refresh(repository).await);
            events
        }
        BackendCommand::Delete { id } => {
            let mut events = Vec::with_capacity(2);
            if let Err(err) = repository.delete(&id).await {
                events.push(persist_failed(PersistOperation::Delete, Some(&id), err.message()));
            }
            events.push(refresh(repository).await);
            events
        }
        BackendCommand::PatchProgress { id, progress } => {
            match repository.patch_progress(&id, progress).await {
                Ok(()) => Vec::new(),
                Err(err) => vec![persist_failed(
                    PersistOperation::Progress,
                    Some(&id),
                    err.message(),
                )],
            }
        }
    }
}

async fn refresh(repository: &ResolutionRepository) -> UiEvent {
    match repository.list().await {
        Ok(resolutions) => UiEvent::SnapshotLoaded(resolutions),
        Err(err) => {
            warn!("failed to list resolutions: {err}");
            UiEvent::SnapshotFailed(err.message().to_string())
        }
    }
}

fn persist_failed(operation: PersistOperation, id: Option<&ResolutionId>, message: &str) -> UiEvent {
    match id {
        Some(id) => warn!(operation = operation.label(), %id, "store write failed: {message}"),
        None => warn!(operation = operation.label(), "store write failed: {message}"),
    }
    UiEvent::PersistFailed {
        operation,
        message: message.to_string(),
    }
}
