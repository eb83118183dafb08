//! List shop inventory use case.

use std::sync::Arc;
use storager_domain::{
    extract_storage_info, sort_items_by_warn, InventoryRecord, RecordId, RecordKind, ShopId,
};

use crate::infrastructure::ports::{RecordRepo, ShopRepo};

use super::error::InventoryError;
use super::types::{InventoryRow, ShopInventory};

/// Load a shop's records in table order: warning records first, stable
/// otherwise. Row indexes used by cell edits refer to this order.
pub(super) async fn load_table(
    record_repo: &dyn RecordRepo,
    kind: RecordKind,
    shop_id: &ShopId,
) -> Result<(Vec<InventoryRecord>, Vec<RecordId>), InventoryError> {
    let mut records = record_repo.list_at_shop(kind, shop_id).await?;
    let warnings = sort_items_by_warn(&mut records, Some(shop_id));
    Ok((records, warnings))
}

/// List shop inventory use case.
pub struct ListShopInventory {
    record_repo: Arc<dyn RecordRepo>,
    shop_repo: Arc<dyn ShopRepo>,
}

impl ListShopInventory {
    pub fn new(record_repo: Arc<dyn RecordRepo>, shop_repo: Arc<dyn ShopRepo>) -> Self {
        Self {
            record_repo,
            shop_repo,
        }
    }

    pub async fn execute(
        &self,
        kind: RecordKind,
        shop_id: ShopId,
    ) -> Result<ShopInventory, InventoryError> {
        if self.shop_repo.get(&shop_id).await?.is_none() {
            return Err(InventoryError::ShopNotFound(shop_id));
        }

        let (records, warnings) = load_table(self.record_repo.as_ref(), kind, &shop_id).await?;
        let rows = records
            .into_iter()
            .map(|record| {
                let storage = extract_storage_info(&record, Some(&shop_id));
                InventoryRow { record, storage }
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            shop_id = %shop_id,
            collection = kind.collection(),
            rows = rows.len(),
            warnings = warnings.len(),
            "Listed shop inventory"
        );

        Ok(ShopInventory {
            shop_id,
            rows,
            warnings,
        })
    }
}
