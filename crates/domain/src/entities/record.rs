//! Inventory record entity - Items and parts stocked at one or more shops
//!
//! # Parallel per-shop sequences
//!
//! The per-shop values of a record live in four index-aligned sequences:
//!
//! ```text
//! shop_id       = ["north", "south"]
//! storage       = [12,      3      ]
//! storage_limit = [5,       10     ]
//! price         = [9.5,     9.9    ]
//! ```
//!
//! `storage[i]` is the quantity on hand at `shop_id[i]`. Sequences may be
//! shorter than `shop_id` in stored documents; readers treat the missing
//! positions as absent instead of failing. Mutators in this module keep the
//! four sequences the same length.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::lenient_sequence;
use crate::error::DomainError;
use crate::ids::{RecordId, ShopId};
use crate::inventory::DEFAULT_STORAGE_LIMIT;

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    #[default]
    Item,
    Part,
}

impl RecordKind {
    /// Document collection name for this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Item => "items",
            Self::Part => "parts",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Part => write!(f, "part"),
        }
    }
}

impl std::str::FromStr for RecordKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item" | "items" => Ok(Self::Item),
            "part" | "parts" => Ok(Self::Part),
            other => Err(DomainError::parse(format!("Unknown record kind: {}", other))),
        }
    }
}

/// Per-shop view of a record: one row of the parallel sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopStock {
    pub shop_id: ShopId,
    pub storage: i64,
    pub storage_limit: i64,
    pub price: f64,
}

impl ShopStock {
    pub fn new(shop_id: ShopId) -> Self {
        Self {
            shop_id,
            storage: 0,
            storage_limit: DEFAULT_STORAGE_LIMIT,
            price: 0.0,
        }
    }

    pub fn with_storage(mut self, storage: i64) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_storage_limit(mut self, storage_limit: i64) -> Self {
        self.storage_limit = storage_limit;
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }
}

/// An item or part stocked at one or more shops.
///
/// Plain data struct: the parallel sequences are public because stored
/// documents may already violate the alignment invariant and every reader
/// must cope with that anyway. Use the methods below to mutate them in an
/// aligned way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: RecordId,
    #[serde(default)]
    pub kind: RecordKind,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Key into the external type catalog
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_sequence")]
    pub shop_id: Vec<ShopId>,
    #[serde(default, deserialize_with = "lenient_sequence")]
    pub storage: Vec<i64>,
    #[serde(default, deserialize_with = "lenient_sequence")]
    pub storage_limit: Vec<i64>,
    #[serde(default, deserialize_with = "lenient_sequence")]
    pub price: Vec<f64>,
    /// Remaining document fields, kept verbatim
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Data for a record that has not been stored yet.
///
/// The document store assigns the id on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    #[serde(default)]
    pub kind: RecordKind,
    #[serde(default)]
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "type")]
    pub category: Option<String>,
}

impl RecordDraft {
    pub fn new(kind: RecordKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            sku: String::new(),
            name: name.into(),
            description: String::new(),
            category: None,
        }
    }

    /// Reject drafts the table could never display.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("Record name cannot be empty"));
        }
        Ok(())
    }
}

impl InventoryRecord {
    /// Build a stored record from a draft, with no shop entries yet.
    pub fn from_draft(id: RecordId, draft: RecordDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            sku: draft.sku,
            name: draft.name.trim().to_string(),
            description: draft.description,
            category: draft.category,
            shop_id: Vec::new(),
            storage: Vec::new(),
            storage_limit: Vec::new(),
            price: Vec::new(),
            attributes: Map::new(),
        }
    }

    /// Number of shops this record is stocked at.
    pub fn shop_count(&self) -> usize {
        self.shop_id.len()
    }

    /// A record with no shop entries left should be deleted.
    pub fn is_orphaned(&self) -> bool {
        self.shop_id.is_empty()
    }

    pub fn is_stocked_at(&self, shop_id: &ShopId) -> bool {
        self.shop_id.contains(shop_id)
    }

    /// Per-shop row for a shop, if the record is stocked there. Missing
    /// positions in short sequences read as defaults.
    pub fn stock_at(&self, shop_id: &ShopId) -> Option<ShopStock> {
        let index = self.shop_id.iter().position(|s| s == shop_id)?;
        Some(ShopStock {
            shop_id: shop_id.clone(),
            storage: self.storage.get(index).copied().unwrap_or(0),
            storage_limit: self
                .storage_limit
                .get(index)
                .copied()
                .unwrap_or(DEFAULT_STORAGE_LIMIT),
            price: self.price.get(index).copied().unwrap_or(0.0),
        })
    }

    /// Stock the record at a shop.
    ///
    /// Appends a new entry when the shop is not present yet; otherwise
    /// overwrites the existing entry. Returns the index of the entry.
    pub fn upsert_stock(&mut self, stock: ShopStock) -> usize {
        self.align();
        match self.shop_id.iter().position(|s| *s == stock.shop_id) {
            Some(index) => {
                self.storage[index] = stock.storage;
                self.storage_limit[index] = stock.storage_limit;
                self.price[index] = stock.price;
                index
            }
            None => {
                self.shop_id.push(stock.shop_id);
                self.storage.push(stock.storage);
                self.storage_limit.push(stock.storage_limit);
                self.price.push(stock.price);
                self.shop_id.len() - 1
            }
        }
    }

    /// Overwrite the quantity on hand at a shop. Returns `false` when the
    /// record is not stocked there.
    pub fn set_storage(&mut self, shop_id: &ShopId, storage: i64) -> bool {
        let Some(index) = self.shop_id.iter().position(|s| s == shop_id) else {
            return false;
        };
        self.align();
        self.storage[index] = storage;
        true
    }

    /// Remove one shop entry from all four sequences.
    ///
    /// Sequences shorter than the removed index are left untouched. Returns
    /// `false` when the record is not stocked at the shop.
    pub fn remove_shop(&mut self, shop_id: &ShopId) -> bool {
        let Some(index) = self.shop_id.iter().position(|s| s == shop_id) else {
            return false;
        };
        self.shop_id.remove(index);
        if index < self.storage.len() {
            self.storage.remove(index);
        }
        if index < self.storage_limit.len() {
            self.storage_limit.remove(index);
        }
        if index < self.price.len() {
            self.price.remove(index);
        }
        true
    }

    /// Resize every sequence to the length of `shop_id`.
    ///
    /// Short sequences are padded with defaults; values past the last shop
    /// belong to no shop and are dropped.
    fn align(&mut self) {
        let len = self.shop_id.len();
        self.storage.resize(len, 0);
        self.storage_limit.resize(len, DEFAULT_STORAGE_LIMIT);
        self.price.resize(len, 0.0);
    }
}
