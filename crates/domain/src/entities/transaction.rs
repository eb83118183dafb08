//! Transaction entity - A stock movement of one record at one shop

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{InventoryRecord, RecordKind};
use crate::error::DomainError;
use crate::ids::{RecordId, ShopId, TransactionId};

/// What a transaction does to the quantity on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Subtract the quantity
    Sale,
    /// Add the quantity
    Restock,
    /// Set the quantity after a stock count
    Adjustment,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sale => write!(f, "sale"),
            Self::Restock => write!(f, "restock"),
            Self::Adjustment => write!(f, "adjustment"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sale" => Ok(Self::Sale),
            "restock" => Ok(Self::Restock),
            "adjustment" => Ok(Self::Adjustment),
            other => Err(DomainError::parse(format!(
                "Unknown transaction kind: {}",
                other
            ))),
        }
    }
}

/// Result of applying a transaction to a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StockMovement {
    pub previous_storage: i64,
    pub new_storage: i64,
    /// Shop price of the record when the movement happened
    pub unit_price: f64,
}

/// A requested stock movement, before it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub shop_id: ShopId,
    pub record_id: RecordId,
    #[serde(default)]
    pub record_kind: RecordKind,
    pub kind: TransactionKind,
    pub quantity: i64,
    #[serde(default)]
    pub note: Option<String>,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.kind {
            TransactionKind::Sale | TransactionKind::Restock if self.quantity <= 0 => Err(
                DomainError::validation(format!("A {} needs a positive quantity", self.kind)),
            ),
            TransactionKind::Adjustment if self.quantity < 0 => Err(DomainError::validation(
                "Stock cannot be adjusted below zero",
            )),
            _ => Ok(()),
        }
    }

    /// Apply the movement to the record's storage at the draft's shop.
    ///
    /// The record is left untouched when an error is returned.
    pub fn apply_to(&self, record: &mut InventoryRecord) -> Result<StockMovement, DomainError> {
        self.validate()?;

        let stock = record.stock_at(&self.shop_id).ok_or_else(|| {
            DomainError::constraint(format!(
                "Record {} is not stocked at shop {}",
                record.id, self.shop_id
            ))
        })?;

        let new_storage = match self.kind {
            TransactionKind::Sale => {
                if self.quantity > stock.storage {
                    return Err(DomainError::constraint(format!(
                        "Insufficient stock: {} on hand, {} requested",
                        stock.storage, self.quantity
                    )));
                }
                stock.storage - self.quantity
            }
            TransactionKind::Restock => stock
                .storage
                .checked_add(self.quantity)
                .ok_or_else(|| DomainError::validation("Restock quantity is too large"))?,
            TransactionKind::Adjustment => self.quantity,
        };

        record.set_storage(&self.shop_id, new_storage);

        Ok(StockMovement {
            previous_storage: stock.storage,
            new_storage,
            unit_price: stock.price,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub shop_id: ShopId,
    pub record_id: RecordId,
    pub record_kind: RecordKind,
    pub kind: TransactionKind,
    pub quantity: i64,
    pub unit_price: f64,
    pub previous_storage: i64,
    pub new_storage: i64,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn from_draft(
        id: TransactionId,
        draft: TransactionDraft,
        movement: StockMovement,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            shop_id: draft.shop_id,
            record_id: draft.record_id,
            record_kind: draft.record_kind,
            kind: draft.kind,
            quantity: draft.quantity,
            unit_price: movement.unit_price,
            previous_storage: movement.previous_storage,
            new_storage: movement.new_storage,
            note: draft.note,
            created_at,
        }
    }

    /// Money value of the movement at the recorded unit price.
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}
