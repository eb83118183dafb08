//! Shop index resolution.

use crate::entities::InventoryRecord;
use crate::ids::ShopId;

/// Anything carrying an ordered `shop_id` sequence.
pub trait ShopScoped {
    fn shop_ids(&self) -> &[ShopId];
}

impl ShopScoped for InventoryRecord {
    fn shop_ids(&self) -> &[ShopId] {
        &self.shop_id
    }
}

impl ShopScoped for [ShopId] {
    fn shop_ids(&self) -> &[ShopId] {
        self
    }
}

impl ShopScoped for Vec<ShopId> {
    fn shop_ids(&self) -> &[ShopId] {
        self
    }
}

/// Position of `shop_id` in the record's parallel sequences.
///
/// `None` when no shop is given or the record is not stocked there.
pub fn resolve_shop_index<T>(record: &T, shop_id: Option<&ShopId>) -> Option<usize>
where
    T: ShopScoped + ?Sized,
{
    let shop_id = shop_id?;
    record.shop_ids().iter().position(|s| s == shop_id)
}
