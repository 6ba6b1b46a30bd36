use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Category, ResolutionDraft};

/// Insert body for the `resolutions` table; the store fills id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewResolutionRow {
    pub title: String,
    pub category: Category,
    pub progress: u8,
    pub why: String,
}

impl From<&ResolutionDraft> for NewResolutionRow {
    fn from(draft: &ResolutionDraft) -> Self {
        Self {
            title: draft.title.clone(),
            category: draft.category,
            progress: draft.progress,
            why: draft.why.clone(),
        }
    }
}

/// Partial update body. Absent fields are left untouched by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ResolutionPatch {
    pub fn full(draft: &ResolutionDraft, now: DateTime<Utc>) -> Self {
        Self {
            title: Some(draft.title.clone()),
            category: Some(draft.category),
            progress: Some(draft.progress),
            why: Some(draft.why.clone()),
            updated_at: now,
        }
    }

    pub fn progress(progress: u8, now: DateTime<Utc>) -> Self {
        Self {
            title: None,
            category: None,
            progress: Some(progress),
            why: None,
            updated_at: now,
        }
    }
}
