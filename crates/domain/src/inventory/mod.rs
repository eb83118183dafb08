//! Shop-scoped stock algorithms over inventory records.
//!
//! Every function here is synchronous and works on caller-owned data. Only
//! [`sort_items_by_warn`] mutates its input, and only the order of the slice.

mod field_change;
mod shop_index;
mod storage_info;
mod warning;

pub use field_change::{apply_field_change, CellEdit, RecordField};
pub use shop_index::{resolve_shop_index, ShopScoped};
pub use storage_info::{extract_storage_info, StorageInfo};
pub use warning::{is_warning, sort_items_by_warn};

/// Threshold used when a record has no explicit limit for a shop.
pub const DEFAULT_STORAGE_LIMIT: i64 = 5;
