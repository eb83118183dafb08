//! Delete record use case.

use std::sync::Arc;
use storager_domain::{RecordId, RecordKind};

use crate::infrastructure::ports::RecordRepo;

use super::error::InventoryError;

/// Delete a record from every shop at once.
pub struct DeleteRecord {
    record_repo: Arc<dyn RecordRepo>,
}

impl DeleteRecord {
    pub fn new(record_repo: Arc<dyn RecordRepo>) -> Self {
        Self { record_repo }
    }

    /// Deleting a record that does not exist succeeds.
    pub async fn execute(&self, kind: RecordKind, record_id: RecordId) -> Result<(), InventoryError> {
        self.record_repo.delete(kind, &record_id).await?;
        tracing::info!(record_id = %record_id, collection = kind.collection(), "Record deleted");
        Ok(())
    }
}
