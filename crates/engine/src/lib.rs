//! StorageR Engine library.
//!
//! Server-side inventory management for shops stocking items and parts.
//!
//! ## Structure
//!
//! - `use_cases/` - User story orchestration across repositories
//! - `infrastructure/` - Port traits and the in-memory document store
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
