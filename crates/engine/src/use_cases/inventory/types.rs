//! Inventory operation input and result types.

use serde::{Deserialize, Serialize};
use storager_domain::{InventoryRecord, RecordDraft, RecordId, ShopId, StorageInfo};

/// What to stock at a shop: a brand-new record or an existing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockTarget {
    New(RecordDraft),
    Existing(RecordId),
}

/// Values for the new shop entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockInput {
    #[serde(default)]
    pub storage: i64,
    #[serde(default)]
    pub storage_limit: Option<i64>,
    #[serde(default)]
    pub price: f64,
}

/// One table row: the record plus its storage at the listed shop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    pub record: InventoryRecord,
    pub storage: StorageInfo,
}

/// The inventory table of one shop, warning records first.
///
/// `warnings` and each row's `low_storage_alert` use different rules. Empty
/// stock is always a warning, while the alert only fires below the limit, so
/// a row with storage 0 and limit 0 is listed in `warnings` with the alert off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShopInventory {
    pub shop_id: ShopId,
    pub rows: Vec<InventoryRow>,
    pub warnings: Vec<RecordId>,
}

/// What happened to a record removed from a shop.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemovalOutcome {
    /// Still stocked at other shops
    Detached { record: InventoryRecord },
    /// That was the last shop; the record is gone
    Deleted { record_id: RecordId },
}
