//! Table-cell edits applied to inventory records.
//!
//! Edits to the four per-shop fields (`shop_id`, `storage`, `storage_limit`,
//! `price`) land at the position of the selected shop. Every other field is a
//! plain scalar update.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{resolve_shop_index, DEFAULT_STORAGE_LIMIT};
use crate::common::Lenient;
use crate::entities::{InventoryRecord, RecordKind};
use crate::error::DomainError;
use crate::ids::{RecordId, ShopId};

/// A record field addressed by its document key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordField {
    Id,
    Kind,
    Sku,
    Name,
    Description,
    Category,
    ShopId,
    Storage,
    StorageLimit,
    Price,
    /// Any other document key
    Attribute(String),
}

impl RecordField {
    /// Whether the field is stored per shop.
    pub fn is_shop_scoped(&self) -> bool {
        matches!(
            self,
            Self::ShopId | Self::Storage | Self::StorageLimit | Self::Price
        )
    }
}

impl From<&str> for RecordField {
    fn from(key: &str) -> Self {
        match key {
            "id" => Self::Id,
            "kind" => Self::Kind,
            "sku" => Self::Sku,
            "name" => Self::Name,
            "description" => Self::Description,
            "category" | "type" => Self::Category,
            "shop_id" => Self::ShopId,
            "storage" => Self::Storage,
            "storage_limit" => Self::StorageLimit,
            "price" => Self::Price,
            other => Self::Attribute(other.to_string()),
        }
    }
}

impl RecordField {
    /// Turn raw table input into a value for this field.
    ///
    /// This is where user input is validated: `id` and `kind` are not
    /// editable, quantities and prices must be numbers. An emptied numeric
    /// cell means zero, and fractional quantities truncate the same way
    /// stored documents are decoded.
    pub fn parse_input(&self, raw: &str) -> Result<Value, DomainError> {
        match self {
            Self::Id | Self::Kind => Err(DomainError::constraint(format!(
                "Field '{}' cannot be edited",
                self.key()
            ))),
            Self::Storage | Self::StorageLimit => {
                let number = parse_number(raw)
                    .ok_or_else(|| DomainError::parse(format!("'{}' is not a number", raw.trim())))?;
                Ok(Value::from(i64::from_value(&Value::from(number))))
            }
            Self::Price => parse_number(raw)
                .map(Value::from)
                .ok_or_else(|| DomainError::parse(format!("'{}' is not a price", raw.trim()))),
            _ => Ok(Value::String(raw.to_string())),
        }
    }

    /// Document key of the field.
    pub fn key(&self) -> &str {
        match self {
            Self::Id => "id",
            Self::Kind => "kind",
            Self::Sku => "sku",
            Self::Name => "name",
            Self::Description => "description",
            Self::Category => "category",
            Self::ShopId => "shop_id",
            Self::Storage => "storage",
            Self::StorageLimit => "storage_limit",
            Self::Price => "price",
            Self::Attribute(key) => key.as_str(),
        }
    }
}

/// An edit coming from the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEdit {
    /// Index of the row in the table's record list
    pub row: usize,
    /// Document key of the edited column
    pub column: String,
    /// Raw input as typed by the user
    pub value: String,
}

impl CellEdit {
    pub fn new(row: usize, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            row,
            column: column.into(),
            value: value.into(),
        }
    }

    /// Validate the raw input for the edited column.
    pub fn parse(&self) -> Result<Value, DomainError> {
        RecordField::from(self.column.as_str()).parse_input(&self.value)
    }

    /// Apply the edit to the row it targets. `Ok(None)` when the row does
    /// not exist.
    pub fn apply(
        &self,
        records: &[InventoryRecord],
        shop_id: Option<&ShopId>,
    ) -> Result<Option<InventoryRecord>, DomainError> {
        let value = self.parse()?;
        Ok(apply_field_change(
            &value,
            &self.column,
            records.get(self.row),
            shop_id,
        ))
    }
}

/// Produce an updated copy of `record` with one field changed.
///
/// - no record: `None`
/// - scalar field: the field is replaced
/// - per-shop field: the value at the shop's position is replaced; when the
///   record is not stocked at `shop_id` the copy comes back unchanged
///
/// Never fails. Values of the wrong shape are coerced the way stored
/// documents are decoded. The input record is never modified.
pub fn apply_field_change(
    value: &Value,
    field_key: &str,
    record: Option<&InventoryRecord>,
    shop_id: Option<&ShopId>,
) -> Option<InventoryRecord> {
    let record = record?;
    let field = RecordField::from(field_key);
    let mut updated = record.clone();

    if !field.is_shop_scoped() {
        set_scalar(&mut updated, field, value);
        return Some(updated);
    }

    // Unknown shop: the edit is dropped.
    let Some(index) = resolve_shop_index(record, shop_id) else {
        return Some(updated);
    };

    match field {
        RecordField::ShopId => set_at(
            &mut updated.shop_id,
            index,
            ShopId::from_value(value),
            ShopId::new(String::new()),
        ),
        RecordField::Storage => set_at(&mut updated.storage, index, i64::from_value(value), 0),
        RecordField::StorageLimit => set_at(
            &mut updated.storage_limit,
            index,
            i64::from_value(value),
            DEFAULT_STORAGE_LIMIT,
        ),
        RecordField::Price => set_at(&mut updated.price, index, f64::from_value(value), 0.0),
        _ => {}
    }

    Some(updated)
}

fn set_scalar(record: &mut InventoryRecord, field: RecordField, value: &Value) {
    match field {
        RecordField::Id => record.id = RecordId::new(String::from_value(value)),
        RecordField::Kind => {
            if let Ok(kind) = String::from_value(value).parse::<RecordKind>() {
                record.kind = kind;
            }
        }
        RecordField::Sku => record.sku = String::from_value(value),
        RecordField::Name => record.name = String::from_value(value),
        RecordField::Description => record.description = String::from_value(value),
        RecordField::Category => {
            let text = String::from_value(value);
            record.category = Some(text.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string);
        }
        RecordField::Attribute(key) => {
            record.attributes.insert(key, value.clone());
        }
        RecordField::ShopId
        | RecordField::Storage
        | RecordField::StorageLimit
        | RecordField::Price => {}
    }
}

/// Write `value` at `index`, growing the sequence with `fill` if needed.
fn set_at<T: Clone>(sequence: &mut Vec<T>, index: usize, value: T, fill: T) {
    if sequence.len() <= index {
        sequence.resize(index + 1, fill);
    }
    sequence[index] = value;
}

/// Finite number typed into a cell. Blank is zero.
fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RecordDraft;
    use serde_json::json;

    fn stocked(shops: &[&str], storage: Vec<i64>) -> InventoryRecord {
        let mut r = InventoryRecord::from_draft(
            RecordId::from("1"),
            RecordDraft::new(RecordKind::Item, "old"),
        );
        r.shop_id = shops.iter().map(|s| ShopId::from(*s)).collect();
        r.storage = storage;
        r
    }

    #[test]
    fn scalar_field_is_replaced() {
        let r = stocked(&[], vec![]);
        let updated = apply_field_change(&json!("9"), "name", Some(&r), None).expect("record");

        let mut expected = r.clone();
        expected.name = "9".to_string();
        assert_eq!(updated, expected);
    }

    #[test]
    fn per_shop_field_is_set_at_shop_position() {
        let r = stocked(&["a"], vec![3]);
        let updated = apply_field_change(&json!(9), "storage", Some(&r), Some(&ShopId::from("a")))
            .expect("record");
        assert_eq!(updated.storage, vec![9]);
        assert_eq!(r.storage, vec![3]);
    }

    #[test]
    fn unknown_shop_drops_the_edit() {
        let r = stocked(&["a"], vec![3]);
        let updated =
            apply_field_change(&json!(9), "storage", Some(&r), Some(&ShopId::from("zzz")))
                .expect("record");
        assert_eq!(updated, r);
    }

    #[test]
    fn missing_record_is_none() {
        assert_eq!(apply_field_change(&json!("9"), "name", None, None), None);
        assert_eq!(
            apply_field_change(&json!(9), "storage", None, Some(&ShopId::from("a"))),
            None
        );
    }

    #[test]
    fn short_sequence_grows_to_reach_shop() {
        let r = stocked(&["a", "b", "c"], vec![1]);
        let updated =
            apply_field_change(&json!(4), "storage_limit", Some(&r), Some(&ShopId::from("c")))
                .expect("record");
        assert_eq!(
            updated.storage_limit,
            vec![DEFAULT_STORAGE_LIMIT, DEFAULT_STORAGE_LIMIT, 4]
        );

        let updated = apply_field_change(&json!(2.75), "price", Some(&r), Some(&ShopId::from("b")))
            .expect("record");
        assert_eq!(updated.price, vec![0.0, 2.75]);
    }

    #[test]
    fn shop_id_edit_renames_the_entry() {
        let r = stocked(&["a", "b"], vec![1, 2]);
        let updated =
            apply_field_change(&json!(" c "), "shop_id", Some(&r), Some(&ShopId::from("b")))
                .expect("record");
        assert_eq!(updated.shop_id, vec![ShopId::from("a"), ShopId::from("c")]);
        assert_eq!(updated.storage, vec![1, 2]);
    }

    #[test]
    fn core_never_fails_on_odd_values() {
        let r = stocked(&["a"], vec![3]);
        let shop = ShopId::from("a");

        let text = apply_field_change(&json!("abc"), "storage", Some(&r), Some(&shop));
        assert_eq!(text.map(|u| u.storage), Some(vec![0]));

        let fraction = apply_field_change(&json!("9.5"), "storage", Some(&r), Some(&shop));
        assert_eq!(fraction.map(|u| u.storage), Some(vec![9]));

        let renamed = apply_field_change(&json!("2"), "id", Some(&r), None).expect("record");
        assert_eq!(renamed.id, RecordId::from("2"));
    }

    #[test]
    fn input_quantities_truncate_like_stored_documents() {
        assert_eq!(RecordField::Storage.parse_input("9.5"), Ok(json!(9)));
        assert_eq!(RecordField::StorageLimit.parse_input(" 12 "), Ok(json!(12)));
        assert_eq!(RecordField::Storage.parse_input(" "), Ok(json!(0)));
        assert_eq!(RecordField::Price.parse_input("2.5"), Ok(json!(2.5)));
    }

    #[test]
    fn input_rejects_non_numbers_and_fixed_fields() {
        assert!(matches!(
            RecordField::Storage.parse_input("lots"),
            Err(DomainError::Parse(_))
        ));
        assert!(matches!(
            RecordField::Price.parse_input("inf"),
            Err(DomainError::Parse(_))
        ));
        assert!(matches!(
            RecordField::Id.parse_input("2"),
            Err(DomainError::Constraint(_))
        ));
        assert!(matches!(
            RecordField::from("kind").parse_input("part"),
            Err(DomainError::Constraint(_))
        ));
    }

    #[test]
    fn unknown_key_is_stored_as_attribute() {
        let r = stocked(&[], vec![]);
        let updated =
            apply_field_change(&json!("ACME"), "supplier", Some(&r), None).expect("record");
        assert_eq!(updated.attributes.get("supplier"), Some(&json!("ACME")));
    }

    #[test]
    fn category_accepts_type_alias_and_clears_on_blank() {
        let r = stocked(&[], vec![]);
        let updated = apply_field_change(&json!("tools"), "type", Some(&r), None).expect("record");
        assert_eq!(updated.category.as_deref(), Some("tools"));
        let cleared =
            apply_field_change(&json!(""), "category", Some(&updated), None).expect("record");
        assert_eq!(cleared.category, None);
    }

    #[test]
    fn cell_edit_parses_then_targets_row() {
        let records = vec![stocked(&["a"], vec![1]), stocked(&["a"], vec![2])];
        let shop = ShopId::from("a");
        let updated = CellEdit::new(1, "storage", "8.9")
            .apply(&records, Some(&shop))
            .expect("valid input")
            .expect("record");
        assert_eq!(updated.storage, vec![8]);

        let missing = CellEdit::new(5, "storage", "8");
        assert_eq!(missing.apply(&records, Some(&shop)), Ok(None));

        let bad = CellEdit::new(0, "storage", "lots");
        assert!(matches!(bad.apply(&records, Some(&shop)), Err(DomainError::Parse(_))));
    }
}
