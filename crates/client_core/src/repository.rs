use std::sync::Arc;

use chrono::Utc;
use shared::{
    domain::{Resolution, ResolutionDraft, ResolutionId},
    protocol::{NewResolutionRow, ResolutionPatch},
};
use tracing::debug;

use crate::{
    error::StoreResult,
    store::{CollectionStore, Filter, OrderBy, SelectQuery},
};

pub const RESOLUTIONS_TABLE: &str = "resolutions";

fn by_id(id: &ResolutionId) -> Filter {
    Filter::eq("id", id.0.clone())
}

/// Resolution-shaped façade over a generic collection store. Every call is a
/// single round trip; nothing is retried.
#[derive(Clone)]
pub struct ResolutionRepository {
    store: Arc<dyn CollectionStore>,
}

impl ResolutionRepository {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { store }
    }

    /// Newest first.
    pub async fn list(&self) -> StoreResult<Vec<Resolution>> {
        let query = SelectQuery::all().order_by(OrderBy::descending("created_at"));
        let rows = self.store.select(RESOLUTIONS_TABLE, &query).await?;
        let resolutions = rows
            .into_iter()
            .map(serde_json::from_value::<Resolution>)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = resolutions.len(), "listed resolutions");
        Ok(resolutions)
    }

    pub async fn create(&self, draft: &ResolutionDraft) -> StoreResult<()> {
        let row = serde_json::to_value(NewResolutionRow::from(draft))?;
        debug!(title = %draft.title, "creating resolution");
        self.store.insert(RESOLUTIONS_TABLE, vec![row]).await
    }

    pub async fn update(&self, id: &ResolutionId, draft: &ResolutionDraft) -> StoreResult<()> {
        let patch = serde_json::to_value(ResolutionPatch::full(draft, Utc::now()))?;
        debug!(%id, "updating resolution");
        self.store.update(RESOLUTIONS_TABLE, &by_id(id), patch).await
    }

    pub async fn patch_progress(&self, id: &ResolutionId, progress: u8) -> StoreResult<()> {
        let patch = serde_json::to_value(ResolutionPatch::progress(progress, Utc::now()))?;
        debug!(%id, progress, "patching resolution progress");
        self.store.update(RESOLUTIONS_TABLE, &by_id(id), patch).await
    }

    pub async fn delete(&self, id: &ResolutionId) -> StoreResult<()> {
        debug!(%id, "deleting resolution");
        self.store.delete(RESOLUTIONS_TABLE, &by_id(id)).await
    }
}
