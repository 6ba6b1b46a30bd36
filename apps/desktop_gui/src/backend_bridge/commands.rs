//! Backend commands queued from UI to backend worker.

use shared::domain::{ResolutionDraft, ResolutionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Refresh,
    /// Updates when `editing_id` is present, creates otherwise; refetches either way.
    Save {
        draft: ResolutionDraft,
        editing_id: Option<ResolutionId>,
    },
    Delete {
        id: ResolutionId,
    },
    PatchProgress {
        id: ResolutionId,
        progress: u8,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Refresh => "refresh",
            BackendCommand::Save {
                editing_id: Some(_),
                ..
            } => "update",
            BackendCommand::Save { editing_id: None, .. } => "create",
            BackendCommand::Delete { .. } => "delete",
            BackendCommand::PatchProgress { .. } => "patch_progress",
        }
    }
}
