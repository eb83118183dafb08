//! Remove record from shop use case.
//!
//! Drops one shop entry from a record. A record left without shops is
//! deleted from its collection.

use std::sync::Arc;
use storager_domain::{RecordId, RecordKind, ShopId};

use crate::infrastructure::ports::RecordRepo;

use super::error::InventoryError;
use super::types::RemovalOutcome;

pub struct RemoveFromShop {
    record_repo: Arc<dyn RecordRepo>,
}

impl RemoveFromShop {
    pub fn new(record_repo: Arc<dyn RecordRepo>) -> Self {
        Self { record_repo }
    }

    pub async fn execute(
        &self,
        kind: RecordKind,
        record_id: RecordId,
        shop_id: ShopId,
    ) -> Result<RemovalOutcome, InventoryError> {
        let mut record = self
            .record_repo
            .get(kind, &record_id)
            .await?
            .ok_or_else(|| InventoryError::RecordNotFound(kind, record_id.clone()))?;

        if !record.remove_shop(&shop_id) {
            return Err(InventoryError::NotStockedAtShop { record_id, shop_id });
        }

        if record.is_orphaned() {
            self.record_repo.delete(kind, &record_id).await?;
            tracing::info!(
                record_id = %record_id,
                shop_id = %shop_id,
                "Record removed from its last shop and deleted"
            );
            return Ok(RemovalOutcome::Deleted { record_id });
        }

        self.record_repo.save(&record).await?;
        tracing::info!(
            record_id = %record_id,
            shop_id = %shop_id,
            shops = record.shop_count(),
            "Record removed from shop"
        );
        Ok(RemovalOutcome::Detached { record })
    }
}
