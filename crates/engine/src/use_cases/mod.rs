//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.

pub mod inventory;
pub mod invoices;
pub mod shops;
pub mod transactions;

pub use inventory::InventoryUseCases;
pub use invoices::InvoiceUseCases;
pub use shops::ShopUseCases;
pub use transactions::TransactionUseCases;
