//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    memory::InMemoryStore,
    ports::{ClockPort, IdPort, InvoiceRepo, RecordRepo, ShopRepo, TransactionRepo},
};
use crate::use_cases;

/// Main application state.
///
/// Holds all repository ports and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository ports.
pub struct Repositories {
    pub record: Arc<dyn RecordRepo>,
    pub shop: Arc<dyn ShopRepo>,
    pub transaction: Arc<dyn TransactionRepo>,
    pub invoice: Arc<dyn InvoiceRepo>,
}

impl Repositories {
    /// All collections backed by one in-memory document store.
    pub fn in_memory(clock: Arc<dyn ClockPort>, ids: Arc<dyn IdPort>) -> Self {
        let store = Arc::new(InMemoryStore::new(clock, ids));
        Self {
            record: store.clone(),
            shop: store.clone(),
            transaction: store.clone(),
            invoice: store,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub inventory: use_cases::InventoryUseCases,
    pub shops: use_cases::ShopUseCases,
    pub transactions: use_cases::TransactionUseCases,
    pub invoices: use_cases::InvoiceUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(repositories: Repositories) -> Self {
        let record_repo = repositories.record.clone();
        let shop_repo = repositories.shop.clone();
        let transaction_repo = repositories.transaction.clone();
        let invoice_repo = repositories.invoice.clone();

        let inventory = use_cases::InventoryUseCases::new(record_repo.clone(), shop_repo.clone());

        let shops = use_cases::ShopUseCases::new(Arc::new(use_cases::shops::ShopOps::new(
            shop_repo.clone(),
        )));

        let transactions = use_cases::TransactionUseCases::new(
            Arc::new(use_cases::transactions::RecordTransaction::new(
                record_repo.clone(),
                shop_repo.clone(),
                transaction_repo.clone(),
            )),
            Arc::new(use_cases::transactions::TransactionHistory::new(
                shop_repo.clone(),
                transaction_repo,
            )),
        );

        let invoices = use_cases::InvoiceUseCases::new(Arc::new(
            use_cases::invoices::InvoiceOps::new(record_repo, shop_repo, invoice_repo),
        ));

        Self {
            repositories,
            use_cases: UseCases {
                inventory,
                shops,
                transactions,
                invoices,
            },
        }
    }
}
