//! Per-shop storage readout for table rows.

use serde::{Deserialize, Serialize};

use super::{resolve_shop_index, DEFAULT_STORAGE_LIMIT};
use crate::entities::InventoryRecord;
use crate::ids::ShopId;

/// Storage values of one record at one shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageInfo {
    pub shop_index: Option<usize>,
    pub storage: i64,
    pub storage_limit: i64,
    pub low_storage_alert: bool,
}

/// Read the storage and limit a record has at a shop.
///
/// Missing positions read as `0` storage and the default limit, so a record
/// that is not stocked at the shop always alerts while the default limit is
/// positive.
pub fn extract_storage_info(record: &InventoryRecord, shop_id: Option<&ShopId>) -> StorageInfo {
    let shop_index = resolve_shop_index(record, shop_id);
    let storage = shop_index
        .and_then(|i| record.storage.get(i).copied())
        .unwrap_or(0);
    let storage_limit = shop_index
        .and_then(|i| record.storage_limit.get(i).copied())
        .unwrap_or(DEFAULT_STORAGE_LIMIT);

    StorageInfo {
        shop_index,
        storage,
        storage_limit,
        low_storage_alert: storage < storage_limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RecordDraft, RecordKind};
    use crate::ids::RecordId;

    fn record(shops: &[&str], storage: Vec<i64>, limits: Vec<i64>) -> InventoryRecord {
        let mut r = InventoryRecord::from_draft(
            RecordId::from("r"),
            RecordDraft::new(RecordKind::Item, "Widget"),
        );
        r.shop_id = shops.iter().map(|s| ShopId::from(*s)).collect();
        r.storage = storage;
        r.storage_limit = limits;
        r
    }

    #[test]
    fn reads_values_at_shop_position() {
        let r = record(&["A", "B"], vec![4, 11], vec![2, 3]);
        let info = extract_storage_info(&r, Some(&ShopId::from("B")));
        assert_eq!(info.shop_index, Some(1));
        assert_eq!(info.storage, 11);
        assert_eq!(info.storage_limit, 3);
        assert!(!info.low_storage_alert);
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let r = record(&["A", "B"], vec![4], vec![]);
        let info = extract_storage_info(&r, Some(&ShopId::from("B")));
        assert_eq!(info.storage, 0);
        assert_eq!(info.storage_limit, DEFAULT_STORAGE_LIMIT);
        assert!(info.low_storage_alert);
    }

    #[test]
    fn unknown_shop_alerts_with_default_limit() {
        let r = record(&["A"], vec![100], vec![1]);
        let info = extract_storage_info(&r, Some(&ShopId::from("Z")));
        assert_eq!(info.shop_index, None);
        assert_eq!(info.storage, 0);
        assert!(info.low_storage_alert);
    }

    #[test]
    fn zero_limit_never_alerts() {
        let r = record(&["A"], vec![0], vec![0]);
        let info = extract_storage_info(&r, Some(&ShopId::from("A")));
        assert!(!info.low_storage_alert);
    }

    #[test]
    fn does_not_mutate_the_record() {
        let r = record(&["A", "B"], vec![1, 2], vec![3]);
        let before = r.clone();
        let _ = extract_storage_info(&r, Some(&ShopId::from("B")));
        assert_eq!(r, before);
    }
}
