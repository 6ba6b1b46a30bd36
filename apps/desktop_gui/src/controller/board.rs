//! The board's single in-memory snapshot and the transitions applied to it.

use crossbeam_channel::Sender;
use shared::domain::{clamp_progress, BoardStats, Resolution, ResolutionDraft, ResolutionId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    /// Terminal for the session; refresh failures land here too.
    Ready,
}

#[derive(Debug, Clone, Default)]
pub struct BoardState {
    pub load_state: LoadState,
    pub resolutions: Vec<Resolution>,
}

/// Owned by the UI thread; the only writer of the snapshot. Store work is
/// queued to the backend worker and its outcome comes back via `apply_event`.
pub struct BoardController {
    state: BoardState,
    cmd_tx: Sender<BackendCommand>,
}

impl BoardController {
    pub fn new(cmd_tx: Sender<BackendCommand>) -> Self {
        Self {
            state: BoardState::default(),
            cmd_tx,
        }
    }

    pub fn initialize(&mut self) {
        if self.state.load_state != LoadState::Uninitialized {
            return;
        }
        self.state.load_state = LoadState::Loading;
        if !dispatch_backend_command(&self.cmd_tx, BackendCommand::Refresh) {
            // No worker will answer; show the empty board instead of spinning.
            self.state.load_state = LoadState::Ready;
        }
    }

    pub fn create_or_update(&mut self, draft: ResolutionDraft, editing_id: Option<ResolutionId>) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Save { draft, editing_id });
    }

    pub fn delete_one(&mut self, id: ResolutionId) {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Delete { id });
    }

    /// Applies the new value locally before the store confirms it. A failed
    /// write is not rolled back; the next full refresh reconciles.
    pub fn set_progress(&mut self, id: &ResolutionId, value: i64) {
        let progress = clamp_progress(value);
        match self.state.resolutions.iter_mut().find(|r| &r.id == id) {
            Some(resolution) => resolution.progress = progress,
            None => tracing::debug!(%id, "progress change for resolution not in snapshot"),
        }
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::PatchProgress {
                id: id.clone(),
                progress,
            },
        );
    }

    pub fn apply_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::SnapshotLoaded(resolutions) => {
                tracing::debug!(count = resolutions.len(), "snapshot replaced");
                self.state.resolutions = resolutions;
                self.state.load_state = LoadState::Ready;
            }
            UiEvent::SnapshotFailed(message) => {
                tracing::warn!("keeping current snapshot after failed refresh: {message}");
                self.state.load_state = LoadState::Ready;
            }
            UiEvent::PersistFailed { operation, message } => {
                tracing::warn!(operation = operation.label(), "change was not saved: {message}");
            }
        }
    }

    pub fn resolutions(&self) -> &[Resolution] {
        &self.state.resolutions
    }

    pub fn find(&self, id: &ResolutionId) -> Option<&Resolution> {
        self.state.resolutions.iter().find(|r| &r.id == id)
    }

    pub fn stats(&self) -> BoardStats {
        BoardStats::from_resolutions(&self.state.resolutions)
    }

    pub fn load_state(&self) -> LoadState {
        self.state.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.state.load_state == LoadState::Loading
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
