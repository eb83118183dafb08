//! Entities - Documents stored by the document database

mod invoice;
mod record;
mod shop;
mod transaction;

pub use invoice::{Invoice, InvoiceDraft, InvoiceLine};
pub use record::{InventoryRecord, RecordDraft, RecordKind, ShopStock};
pub use shop::{Shop, ShopDraft};
pub use transaction::{StockMovement, Transaction, TransactionDraft, TransactionKind};
