//! Inventory operation errors.

use storager_domain::{DomainError, RecordId, RecordKind, ShopId};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during inventory operations.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("{0} not found: {1}")]
    RecordNotFound(RecordKind, RecordId),
    #[error("Shop not found: {0}")]
    ShopNotFound(ShopId),
    #[error("Record {record_id} is not stocked at shop {shop_id}")]
    NotStockedAtShop { record_id: RecordId, shop_id: ShopId },
    #[error("No row {row} in the table of shop {shop_id}")]
    RowNotFound { row: usize, shop_id: ShopId },
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
