//! Events flowing from the backend worker back to the UI thread.

use shared::domain::Resolution;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOperation {
    Create,
    Update,
    Delete,
    Progress,
}

impl PersistOperation {
    pub fn label(self) -> &'static str {
        match self {
            PersistOperation::Create => "create",
            PersistOperation::Update => "update",
            PersistOperation::Delete => "delete",
            PersistOperation::Progress => "progress",
        }
    }
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Full newest-first listing; replaces the snapshot wholesale.
    SnapshotLoaded(Vec<Resolution>),
    SnapshotFailed(String),
    PersistFailed {
        operation: PersistOperation,
        message: String,
    },
}
