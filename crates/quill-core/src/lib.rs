//! # quill-core: Pure Business Logic for Quill
//!
//! This crate is the **heart** of Quill. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Quill Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       quill CLI (apps/cli)                      │   │
//! │  │   company ──► product ──► client ──► quote ──► invoice          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quill-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │  address  │  │   │
//! │  │   │  Product  │  │   Money   │  │  engine   │  │  recon-   │  │   │
//! │  │   │   Quote   │  │  TaxRate  │  │ TaxSplit  │  │ ciliation │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐                                 │   │
//! │  │   │   quote   │  │ validation│                                 │   │
//! │  │   │  drafts   │  │   rules   │                                 │   │
//! │  │   └───────────┘  └───────────┘                                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           quill-store (persistence) / quill-render (HTML)       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Quote, Invoice, Client, Company)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - The quote totals engine and CGST/SGST tax split
//! - [`address`] - Structured/free-text address reconciliation
//! - [`quote`] - Quote draft editing and finalization
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use quill_core::totals::compute_totals;
//! use quill_core::types::{LineItem, TaxRate};
//!
//! let items = vec![LineItem {
//!     product_id: "p-1".to_string(),
//!     quantity: 3,
//!     unit_price_cents: 10_000, // $100.00
//! }];
//!
//! let totals = compute_totals(&items, |_| Some(TaxRate::from_bps(1800)));
//! assert_eq!(totals.total.cents(), 35_400); // $354.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod address;
pub mod error;
pub mod money;
pub mod quote;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quill_core::Money` instead of
// `use quill_core::money::Money`

pub use address::Address;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use quote::QuoteDraft;
pub use totals::{compute_totals, LineTotals, QuoteTotals, TaxSplit};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fallback tax rate in basis points (18%) applied when a line item's
/// product reference cannot be resolved, and the default for new products.
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Default HSN/SAC classification code backfilled onto legacy products
/// saved before the field existed.
pub const DEFAULT_HSN_SAC: &str = "7607";

/// Default unit label for new products.
pub const DEFAULT_UNIT: &str = "pcs";

/// Days a new quote stays valid from its issue date.
pub const QUOTE_VALIDITY_DAYS: i64 = 30;

/// Maximum line items on a single quote
///
/// Prevents runaway documents and keeps the rendered table printable.
pub const MAX_QUOTE_ITEMS: usize = 100;

/// Maximum quantity of a single line item
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
