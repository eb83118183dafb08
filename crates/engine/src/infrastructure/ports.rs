//! Port traits for infrastructure boundaries.
//!
//! Ports exist for:
//! - Document storage (in-memory today, a hosted document database later)
//! - Clock and id generation (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storager_domain::{
    InventoryRecord, Invoice, InvoiceDraft, InvoiceId, RecordDraft, RecordId, RecordKind, Shop,
    ShopDraft, ShopId, ShopStock, StockMovement, Transaction, TransactionDraft,
};

// =============================================================================
// Error Types
// =============================================================================

/// Failure of the backing store. Missing documents are not errors; lookups
/// return `None` and deletes of missing documents succeed.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),
}

impl RepoError {
    pub fn database(context: &str, error: impl std::fmt::Display) -> Self {
        Self::Database(format!("{}: {}", context, error))
    }
}

// =============================================================================
// Database Ports (one per collection)
// =============================================================================

/// Items and parts. Each kind is its own collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordRepo: Send + Sync {
    async fn get(&self, kind: RecordKind, id: &RecordId)
        -> Result<Option<InventoryRecord>, RepoError>;
    /// Records with `shop_id` among their shop entries.
    async fn list_at_shop(
        &self,
        kind: RecordKind,
        shop_id: &ShopId,
    ) -> Result<Vec<InventoryRecord>, RepoError>;
    /// Store a new record stocked at its first shop, in one write. The store
    /// assigns the id.
    async fn create(
        &self,
        draft: RecordDraft,
        first_stock: ShopStock,
    ) -> Result<InventoryRecord, RepoError>;
    /// Merge a record into the stored document with the same id.
    async fn save(&self, record: &InventoryRecord) -> Result<(), RepoError>;
    async fn delete(&self, kind: RecordKind, id: &RecordId) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopRepo: Send + Sync {
    async fn get(&self, id: &ShopId) -> Result<Option<Shop>, RepoError>;
    async fn list(&self) -> Result<Vec<Shop>, RepoError>;
    async fn create(&self, draft: ShopDraft) -> Result<Shop, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepo: Send + Sync {
    async fn create(
        &self,
        draft: TransactionDraft,
        movement: StockMovement,
    ) -> Result<Transaction, RepoError>;
    /// Newest first.
    async fn list_for_shop(&self, shop_id: &ShopId) -> Result<Vec<Transaction>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvoiceRepo: Send + Sync {
    async fn get(&self, id: &InvoiceId) -> Result<Option<Invoice>, RepoError>;
    async fn create(&self, draft: InvoiceDraft) -> Result<Invoice, RepoError>;
    /// Newest first.
    async fn list_for_shop(&self, shop_id: &ShopId) -> Result<Vec<Invoice>, RepoError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of new document ids.
#[cfg_attr(test, mockall::automock)]
pub trait IdPort: Send + Sync {
    fn next_id(&self) -> String;
}
