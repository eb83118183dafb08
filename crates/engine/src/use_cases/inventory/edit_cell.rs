//! Edit record field use case.
//!
//! Applies one table cell edit to a stored record. Per-shop columns write
//! the value at the position of the listed shop.

use std::sync::Arc;
use storager_domain::{
    apply_field_change, CellEdit, InventoryRecord, RecordField, RecordId, RecordKind, ShopId,
};

use crate::infrastructure::ports::RecordRepo;

use super::error::InventoryError;
use super::list_for_shop::load_table;

pub struct EditRecordField {
    record_repo: Arc<dyn RecordRepo>,
}

impl EditRecordField {
    pub fn new(record_repo: Arc<dyn RecordRepo>) -> Self {
        Self { record_repo }
    }

    /// Edit a field of the record with `record_id`.
    ///
    /// `value` is raw table input; it is validated before the record is
    /// touched. The record is only written back when the edit changed it.
    pub async fn execute(
        &self,
        kind: RecordKind,
        record_id: RecordId,
        shop_id: Option<ShopId>,
        field: &str,
        value: &str,
    ) -> Result<InventoryRecord, InventoryError> {
        let record = self
            .record_repo
            .get(kind, &record_id)
            .await?
            .ok_or_else(|| InventoryError::RecordNotFound(kind, record_id.clone()))?;

        let input = RecordField::from(field).parse_input(value)?;
        let updated = apply_field_change(&input, field, Some(&record), shop_id.as_ref())
            .unwrap_or_else(|| record.clone());
        self.store_if_changed(&record, updated, field).await
    }

    /// Edit the cell at `edit.row` of the shop's table.
    ///
    /// Rows are counted in the order [`super::ListShopInventory`] returns them.
    pub async fn execute_row(
        &self,
        kind: RecordKind,
        shop_id: ShopId,
        edit: CellEdit,
    ) -> Result<InventoryRecord, InventoryError> {
        let (records, _) = load_table(self.record_repo.as_ref(), kind, &shop_id).await?;
        let Some(original) = records.get(edit.row) else {
            return Err(InventoryError::RowNotFound {
                row: edit.row,
                shop_id,
            });
        };
        let updated = edit
            .apply(&records, Some(&shop_id))?
            .unwrap_or_else(|| original.clone());
        self.store_if_changed(original, updated, &edit.column).await
    }

    async fn store_if_changed(
        &self,
        original: &InventoryRecord,
        updated: InventoryRecord,
        field: &str,
    ) -> Result<InventoryRecord, InventoryError> {
        if updated == *original {
            tracing::debug!(record_id = %original.id, field, "Edit left record unchanged");
            return Ok(updated);
        }
        self.record_repo.save(&updated).await?;
        tracing::info!(record_id = %updated.id, field, "Record field updated");
        Ok(updated)
    }
}
