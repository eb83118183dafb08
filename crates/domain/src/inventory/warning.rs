//! Low-storage warning ordering.

use std::collections::HashSet;

use super::{resolve_shop_index, DEFAULT_STORAGE_LIMIT};
use crate::entities::InventoryRecord;
use crate::ids::{RecordId, ShopId};

/// Whether a record is low on stock at a shop.
///
/// Empty stock always warns, even when the limit is zero.
pub fn is_warning(record: &InventoryRecord, shop_id: Option<&ShopId>) -> bool {
    let index = resolve_shop_index(record, shop_id);
    let storage = index
        .and_then(|i| record.storage.get(i).copied())
        .unwrap_or(0);
    let limit = index
        .and_then(|i| record.storage_limit.get(i).copied())
        .unwrap_or(DEFAULT_STORAGE_LIMIT);
    storage == 0 || storage < limit
}

/// Move warning records to the front and return their ids.
///
/// The sort is stable: records with the same warning status keep their
/// relative order. Ids come back in the order of the sorted slice, each once.
pub fn sort_items_by_warn(records: &mut [InventoryRecord], shop_id: Option<&ShopId>) -> Vec<RecordId> {
    records.sort_by_cached_key(|r| !is_warning(r, shop_id));

    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    for record in records.iter() {
        if !is_warning(record, shop_id) {
            break;
        }
        if seen.insert(&record.id) {
            warnings.push(record.id.clone());
        }
    }
    warnings
}
