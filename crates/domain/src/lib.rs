//! StorageR domain: inventory records stocked across shops, and the pure
//! algorithms that read and edit their per-shop values.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod inventory;

pub use entities::{
    Invoice, InvoiceDraft, InvoiceLine, InventoryRecord, RecordDraft, RecordKind, Shop, ShopDraft,
    ShopStock, StockMovement, Transaction, TransactionDraft, TransactionKind,
};

pub use error::DomainError;

pub use ids::{InvoiceId, RecordId, ShopId, TransactionId};

pub use inventory::{
    apply_field_change, extract_storage_info, is_warning, resolve_shop_index, sort_items_by_warn,
    CellEdit, RecordField, ShopScoped, StorageInfo, DEFAULT_STORAGE_LIMIT,
};
