//! Inventory use cases
//!
//! Records (items and parts) as seen from one shop: stocking, removal,
//! field edits and the warning-ordered table.

mod add_record;
mod delete_record;
mod edit_cell;
mod error;
mod list_for_shop;
mod remove_from_shop;
mod types;

use std::sync::Arc;

pub use add_record::AddRecordAtShop;
pub use delete_record::DeleteRecord;
pub use edit_cell::EditRecordField;
pub use error::InventoryError;
pub use list_for_shop::ListShopInventory;
pub use remove_from_shop::RemoveFromShop;
pub use types::{InventoryRow, RemovalOutcome, ShopInventory, StockInput, StockTarget};

use crate::infrastructure::ports::{RecordRepo, ShopRepo};

/// Container for inventory use cases.
pub struct InventoryUseCases {
    pub add: Arc<AddRecordAtShop>,
    pub remove_from_shop: Arc<RemoveFromShop>,
    pub edit: Arc<EditRecordField>,
    pub list: Arc<ListShopInventory>,
    pub delete: Arc<DeleteRecord>,
}

impl InventoryUseCases {
    pub fn new(record_repo: Arc<dyn RecordRepo>, shop_repo: Arc<dyn ShopRepo>) -> Self {
        Self {
            add: Arc::new(AddRecordAtShop::new(record_repo.clone(), shop_repo.clone())),
            remove_from_shop: Arc::new(RemoveFromShop::new(record_repo.clone())),
            edit: Arc::new(EditRecordField::new(record_repo.clone())),
            list: Arc::new(ListShopInventory::new(record_repo.clone(), shop_repo)),
            delete: Arc::new(DeleteRecord::new(record_repo)),
        }
    }
}
