//! Invoice entity - Records billed at a shop's prices

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{InventoryRecord, RecordKind};
use crate::error::DomainError;
use crate::ids::{InvoiceId, RecordId, ShopId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub record_id: RecordId,
    pub record_kind: RecordKind,
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

impl InvoiceLine {
    /// Bill `quantity` of a record at the price it has at `shop_id`.
    pub fn for_record(
        record: &InventoryRecord,
        shop_id: &ShopId,
        quantity: i64,
    ) -> Result<Self, DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation(
                "Invoice quantity must be positive",
            ));
        }
        let stock = record.stock_at(shop_id).ok_or_else(|| {
            DomainError::constraint(format!(
                "Record {} is not stocked at shop {}",
                record.id, shop_id
            ))
        })?;

        Ok(Self {
            record_id: record.id.clone(),
            record_kind: record.kind,
            name: record.name.clone(),
            quantity,
            unit_price: stock.price,
            line_total: quantity as f64 * stock.price,
        })
    }
}

/// An invoice that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDraft {
    pub shop_id: ShopId,
    #[serde(default)]
    pub customer: Option<String>,
    pub lines: Vec<InvoiceLine>,
}

impl InvoiceDraft {
    pub fn new(
        shop_id: ShopId,
        customer: Option<String>,
        lines: Vec<InvoiceLine>,
    ) -> Result<Self, DomainError> {
        if lines.is_empty() {
            return Err(DomainError::validation("An invoice needs at least one line"));
        }
        Ok(Self {
            shop_id,
            customer: customer
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
            lines,
        })
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.line_total).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub shop_id: ShopId,
    #[serde(default)]
    pub customer: Option<String>,
    pub lines: Vec<InvoiceLine>,
    pub total: f64,
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    pub fn from_draft(id: InvoiceId, draft: InvoiceDraft, issued_at: DateTime<Utc>) -> Self {
        let total = draft.total();
        Self {
            id,
            shop_id: draft.shop_id,
            customer: draft.customer,
            lines: draft.lines,
            total,
            issued_at,
        }
    }
}
