//! # Repository Module
//!
//! Repository implementations over the key-value document store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  Repositories abstract document access behind a typed API.              │
//! │                                                                         │
//! │  CLI Command                                                            │
//! │       │                                                                 │
//! │       │  store.products().add(product)                                  │
//! │       │  ↓                                                               │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list(&self)                                                        │
//! │  ├── get(&self, id)                                                     │
//! │  ├── add(&self, product)                                                │
//! │  └── remove(&self, id)                                                  │
//! │       │                                                                 │
//! │       │  read collection → edit in memory → rewrite collection          │
//! │       ▼                                                                 │
//! │  kv_store (one JSON document per collection)                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`company::CompanyRepository`] - Company profile (singleton)
//! - [`product::ProductRepository`] - Product catalog
//! - [`client::ClientRepository`] - Client book
//! - [`quote::QuoteRepository`] - Finalized quote snapshots
//! - [`invoice::InvoiceRepository`] - Invoices derived from quotes
//! - [`session::SessionRepository`] - Login/setup flags

pub mod client;
pub mod company;
pub mod invoice;
pub mod product;
pub mod quote;
pub mod session;

/// Well-known document keys.
///
/// These names predate this implementation; documents written by earlier
/// generations of the tool use them, so they are frozen.
pub mod keys {
    pub const COMPANY: &str = "companyData";
    pub const PRODUCTS: &str = "products";
    pub const CLIENTS: &str = "clients";
    pub const QUOTES: &str = "quotes";
    pub const INVOICES: &str = "invoices";
    pub const SESSION: &str = "session";
}
