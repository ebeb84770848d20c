//! # quill-store: Persistence Layer for Quill
//!
//! This crate provides persistence for Quill. It uses SQLite as a
//! key-value document store: each collection is one JSON document under
//! a well-known key, read in full and rewritten in full.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Quill Data Flow                                 │
//! │                                                                         │
//! │  CLI Command (quote create)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    quill-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Store     │    │ Repositories  │    │   Upgrades   │  │   │
//! │  │   │  (store.rs)   │    │ (quote.rs...) │    │ (upgrade.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ QuoteRepo     │    │ float money  │  │   │
//! │  │   │ kv get/put    │    │ ProductRepo   │    │  → cents     │  │   │
//! │  │   │               │    │ InvoiceRepo   │    │ free text    │  │   │
//! │  │   └───────────────┘    └───────────────┘    │  → address   │  │   │
//! │  │                                             └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite: kv_store (one row per collection)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Connection pool and the raw key-value interface
//! - [`migrations`] - Embedded database migrations
//! - [`upgrade`] - Read-time upgrades of legacy record shapes
//! - [`error`] - Store error types
//! - [`repository`] - Typed repositories per collection
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quill_store::{Store, StoreConfig};
//!
//! let store = Store::new(StoreConfig::new("path/to/quill.db")).await?;
//!
//! let products = store.products().list().await?;
//! store.quotes().save(quote).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod repository;
pub mod store;
pub mod upgrade;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use store::{Store, StoreConfig};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::company::CompanyRepository;
pub use repository::invoice::InvoiceRepository;
pub use repository::product::ProductRepository;
pub use repository::quote::QuoteRepository;
pub use repository::session::SessionRepository;
