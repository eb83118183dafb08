//! Add record at shop use case.
//!
//! Creates a record with a single shop entry, or extends an existing record
//! to one more shop.

use std::sync::Arc;
use storager_domain::{InventoryRecord, RecordKind, ShopId, ShopStock, DEFAULT_STORAGE_LIMIT};

use crate::infrastructure::ports::{RecordRepo, ShopRepo};

use super::error::InventoryError;
use super::types::{StockInput, StockTarget};

/// Add record at shop use case.
///
/// Orchestrates: shop validation, then either a stocked record creation or a
/// lookup plus shop entry upsert.
pub struct AddRecordAtShop {
    record_repo: Arc<dyn RecordRepo>,
    shop_repo: Arc<dyn ShopRepo>,
}

impl AddRecordAtShop {
    pub fn new(record_repo: Arc<dyn RecordRepo>, shop_repo: Arc<dyn ShopRepo>) -> Self {
        Self {
            record_repo,
            shop_repo,
        }
    }

    /// Execute the add record use case.
    ///
    /// # Arguments
    /// * `kind` - Collection of the record (items or parts)
    /// * `shop_id` - Shop the record is stocked at
    /// * `target` - New record draft, or id of an existing record
    /// * `stock` - Storage, limit and price for this shop
    ///
    /// # Returns
    /// * `Ok(InventoryRecord)` - The stored record
    /// * `Err(InventoryError)` - Unknown shop or record, invalid draft
    pub async fn execute(
        &self,
        kind: RecordKind,
        shop_id: ShopId,
        target: StockTarget,
        stock: StockInput,
    ) -> Result<InventoryRecord, InventoryError> {
        if self.shop_repo.get(&shop_id).await?.is_none() {
            return Err(InventoryError::ShopNotFound(shop_id));
        }

        let stock = ShopStock::new(shop_id.clone())
            .with_storage(stock.storage)
            .with_storage_limit(stock.storage_limit.unwrap_or(DEFAULT_STORAGE_LIMIT))
            .with_price(stock.price);

        // New records are written once, already stocked at their first shop.
        let record = match target {
            StockTarget::New(mut draft) => {
                draft.validate()?;
                draft.kind = kind;
                self.record_repo.create(draft, stock).await?
            }
            StockTarget::Existing(record_id) => {
                let mut record = self
                    .record_repo
                    .get(kind, &record_id)
                    .await?
                    .ok_or_else(|| InventoryError::RecordNotFound(kind, record_id.clone()))?;
                record.upsert_stock(stock);
                self.record_repo.save(&record).await?;
                record
            }
        };

        tracing::info!(
            record_id = %record.id,
            shop_id = %shop_id,
            shops = record.shop_count(),
            "Record stocked at shop"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockRecordRepo, MockShopRepo, RepoError};
    use chrono::Utc;
    use storager_domain::{RecordDraft, RecordId, Shop};

    fn shop(id: &str) -> Shop {
        Shop {
            id: ShopId::from(id),
            name: id.to_string(),
            address: None,
            created_at: Utc::now(),
        }
    }

    fn shop_repo_with(id: &'static str) -> MockShopRepo {
        let mut shop_repo = MockShopRepo::new();
        shop_repo
            .expect_get()
            .withf(move |s| s.as_str() == id)
            .returning(move |_| Ok(Some(shop(id))));
        shop_repo
    }

    fn stock() -> StockInput {
        StockInput {
            storage: 4,
            storage_limit: None,
            price: 1.5,
        }
    }

    #[tokio::test]
    async fn when_shop_missing_returns_error() {
        let record_repo = MockRecordRepo::new();
        let mut shop_repo = MockShopRepo::new();
        shop_repo.expect_get().returning(|_| Ok(None));

        let use_case = AddRecordAtShop::new(Arc::new(record_repo), Arc::new(shop_repo));
        let result = use_case
            .execute(
                RecordKind::Item,
                ShopId::from("nope"),
                StockTarget::New(RecordDraft::new(RecordKind::Item, "Pump")),
                stock(),
            )
            .await;

        assert!(matches!(result, Err(InventoryError::ShopNotFound(_))));
    }

    #[tokio::test]
    async fn new_record_gets_single_shop_entry() {
        let mut record_repo = MockRecordRepo::new();
        record_repo
            .expect_create()
            .withf(|draft, stock| {
                draft.name == "Pump"
                    && draft.kind == RecordKind::Part
                    && stock.shop_id == ShopId::from("s1")
                    && stock.storage == 4
            })
            .times(1)
            .returning(|draft, stock| {
                let mut record = InventoryRecord::from_draft(RecordId::from("new"), draft);
                record.upsert_stock(stock);
                Ok(record)
            });
        record_repo.expect_save().never();

        let use_case =
            AddRecordAtShop::new(Arc::new(record_repo), Arc::new(shop_repo_with("s1")));
        let record = use_case
            .execute(
                RecordKind::Part,
                ShopId::from("s1"),
                StockTarget::New(RecordDraft::new(RecordKind::Item, "Pump")),
                stock(),
            )
            .await
            .expect("added");

        assert_eq!(record.id, RecordId::from("new"));
        assert_eq!(record.kind, RecordKind::Part);
        assert_eq!(record.storage_limit, vec![DEFAULT_STORAGE_LIMIT]);
        assert_eq!(record.price, vec![1.5]);
    }

    #[tokio::test]
    async fn existing_record_is_extended_to_another_shop() {
        let mut existing = InventoryRecord::from_draft(
            RecordId::from("r1"),
            RecordDraft::new(RecordKind::Item, "Pump"),
        );
        existing.upsert_stock(ShopStock::new(ShopId::from("s0")).with_storage(9));

        let mut record_repo = MockRecordRepo::new();
        let existing_clone = existing.clone();
        record_repo
            .expect_get()
            .withf(|kind, id| *kind == RecordKind::Item && id.as_str() == "r1")
            .returning(move |_, _| Ok(Some(existing_clone.clone())));
        record_repo
            .expect_save()
            .withf(|r| r.shop_id.len() == 2 && r.storage == vec![9, 4])
            .times(1)
            .returning(|_| Ok(()));

        let use_case =
            AddRecordAtShop::new(Arc::new(record_repo), Arc::new(shop_repo_with("s1")));
        let record = use_case
            .execute(
                RecordKind::Item,
                ShopId::from("s1"),
                StockTarget::Existing(RecordId::from("r1")),
                stock(),
            )
            .await
            .expect("extended");

        assert_eq!(record.shop_id, vec![ShopId::from("s0"), ShopId::from("s1")]);
    }

    #[tokio::test]
    async fn failed_create_leaves_no_follow_up_write() {
        let mut record_repo = MockRecordRepo::new();
        record_repo
            .expect_create()
            .times(1)
            .returning(|_, _| Err(RepoError::database("create", "connection reset")));
        record_repo.expect_save().never();
        record_repo.expect_delete().never();

        let use_case =
            AddRecordAtShop::new(Arc::new(record_repo), Arc::new(shop_repo_with("s1")));
        let result = use_case
            .execute(
                RecordKind::Item,
                ShopId::from("s1"),
                StockTarget::New(RecordDraft::new(RecordKind::Item, "Pump")),
                stock(),
            )
            .await;

        assert!(matches!(result, Err(InventoryError::Repo(_))));
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_create() {
        let record_repo = MockRecordRepo::new();
        let use_case =
            AddRecordAtShop::new(Arc::new(record_repo), Arc::new(shop_repo_with("s1")));
        let result = use_case
            .execute(
                RecordKind::Item,
                ShopId::from("s1"),
                StockTarget::New(RecordDraft::new(RecordKind::Item, " ")),
                stock(),
            )
            .await;

        assert!(matches!(result, Err(InventoryError::Validation(_))));
    }

    #[tokio::test]
    async fn unknown_existing_record_returns_error() {
        let mut record_repo = MockRecordRepo::new();
        record_repo.expect_get().returning(|_, _| Ok(None));

        let use_case =
            AddRecordAtShop::new(Arc::new(record_repo), Arc::new(shop_repo_with("s1")));
        let result = use_case
            .execute(
                RecordKind::Item,
                ShopId::from("s1"),
                StockTarget::Existing(RecordId::from("ghost")),
                stock(),
            )
            .await;

        assert!(matches!(result, Err(InventoryError::RecordNotFound(..))));
    }
}
