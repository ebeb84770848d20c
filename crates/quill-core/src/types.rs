//! # Domain Types
//!
//! Core domain types used throughout Quill.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Quote       │   │    Invoice      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  quote_number   │   │  id             │       │
//! │  │  price_cents    │◄──│  items[]        │──►│  quote (snapshot)│      │
//! │  │  tax_rate_bps   │   │  cached totals  │   │  status         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │         ▲ weak, by id                                                   │
//! │  ┌──────┴──────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │     Client      │   │    Company      │       │
//! │  │  product_id     │   │  structured     │   │  profile +      │       │
//! │  │  qty, price     │   │  address fields │   │  address        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! All persisted types serialize with camelCase field names so that
//! documents written by earlier generations of the tool (a browser app
//! over local key-value storage) stay readable. Genuinely legacy shapes
//! (float prices, missing tax rates) are handled once at load time by
//! the store's upgrade pass, not here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::money::Money;
use crate::{DEFAULT_HSN_SAC, DEFAULT_TAX_RATE_BPS, DEFAULT_UNIT};

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (the catalog default, IGST-style per-product rate)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// The fallback rate applied when a line item's product reference
/// cannot be resolved (deleted or never selected).
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product available for quoting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the quote document.
    pub name: String,

    /// Longer description printed under the name.
    #[serde(default)]
    pub description: String,

    /// HSN/SAC classification code printed on tax documents.
    #[serde(default = "default_hsn_sac")]
    pub hsn_sac: String,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Unit label ("pcs", "hrs", "kg", ...).
    #[serde(default = "default_unit")]
    pub unit: String,

    /// Per-product tax rate in basis points (1800 = 18%).
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,
}

fn default_hsn_sac() -> String {
    DEFAULT_HSN_SAC.to_string()
}

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE_BPS
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the tax rate.
    #[inline]
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// A line item on a quote.
///
/// ## Weak Product Reference
/// `product_id` is a reference by id only - no ownership. The unit price is
/// copied from the product at selection time and independently editable
/// afterwards. If the product is later deleted, the id dangles: the totals
/// engine falls back to the default tax rate and the renderer shows
/// "Unknown Product". Totals stay computable either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product id. May be empty (nothing selected yet) or stale.
    #[serde(default)]
    pub product_id: String,

    /// Quantity quoted.
    pub quantity: i64,

    /// Unit price in cents, frozen from the product when selected.
    pub unit_price_cents: i64,
}

impl LineItem {
    /// Creates a line item for a product, copying its current price.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        LineItem {
            product_id: product.id.clone(),
            quantity,
            unit_price_cents: product.price_cents,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line subtotal before tax: quantity × unit price.
    #[inline]
    pub fn line_subtotal(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Quote
// =============================================================================

/// A persisted quote snapshot.
///
/// ## Cached Totals
/// `subtotal_cents` / `tax_cents` / `total_cents` are denormalized for
/// listing screens. They are recomputed from the line items whenever the
/// quote is (re)built; the authoritative computation is always
/// [`crate::totals::compute_totals`] over `items`.
///
/// ## Lifecycle
/// Built in memory by [`crate::quote::QuoteDraft`], persisted when
/// explicitly saved, and immutable afterwards except through an explicit
/// edit-then-resave cycle that replaces the snapshot matching its number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Quote number, e.g. "Q-1724990400000" (timestamp-derived by default).
    pub quote_number: String,

    pub client_name: String,

    #[serde(default)]
    pub client_email: String,

    /// Client address as display text (street line, then "city, state zip").
    #[serde(default)]
    pub client_address: String,

    /// Issue date.
    pub date: NaiveDate,

    /// Validity date (issue date + 30 days by default).
    pub valid_until: NaiveDate,

    /// Ordered line items.
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub notes: String,

    /// Cached subtotal in cents (see struct docs).
    pub subtotal_cents: i64,

    /// Cached aggregate tax in cents.
    pub tax_cents: i64,

    /// Cached grand total in cents.
    pub total_cents: i64,
}

impl Quote {
    /// Returns the cached subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    /// Returns the cached aggregate tax as Money.
    #[inline]
    pub fn tax(&self) -> Money {
        Money::from_cents(self.tax_cents)
    }

    /// Returns the cached grand total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// Invoice workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Created but not yet sent to the client.
    Draft,
    /// Sent and awaiting payment.
    Sent,
    /// Paid in full.
    Paid,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl InvoiceStatus {
    /// Stable lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
        }
    }
}

/// An invoice: a quote snapshot plus workflow status and timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice id. For invoices derived from quotes this is the quote number.
    pub id: String,

    /// The underlying quote snapshot, flattened into the same document.
    #[serde(flatten)]
    pub quote: Quote,

    #[serde(default)]
    pub status: InvoiceStatus,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Wraps a quote snapshot as a draft invoice.
    pub fn from_quote(quote: Quote, now: DateTime<Utc>) -> Self {
        Invoice {
            id: quote.quote_number.clone(),
            quote,
            status: InvoiceStatus::Draft,
            created_at: now,
            updated_at: now,
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A directory entry for a repeat client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub street_address: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub pin_code: String,

    pub created_at: DateTime<Utc>,
}

impl Client {
    /// The client's address as the structured record used for validation
    /// and formatting.
    pub fn address(&self) -> Address {
        Address {
            street: self.street_address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.pin_code.clone(),
        }
    }
}

// =============================================================================
// Company
// =============================================================================

/// The company profile printed in the quote header (singleton record).
///
/// ## Address Generations
/// This record has gone through three shapes for its address alone:
/// a single free-text block, then structured fields, then structured
/// fields plus the preserved legacy text. The store's upgrade pass folds
/// the older two into this one; `legacy_address` keeps the original
/// free-text block verbatim so nothing is silently dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub website: String,

    #[serde(default)]
    pub tax_id: String,

    #[serde(default)]
    pub address: Address,

    /// Verbatim free-text address from before the structured shape,
    /// kept as a display fallback. None once the profile is re-saved
    /// with structured fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy_address: Option<String>,
}

impl Company {
    /// Address text for display: the structured form when present,
    /// otherwise the preserved legacy block.
    pub fn display_address(&self) -> String {
        if self.address.is_empty() {
            self.legacy_address.clone().unwrap_or_default()
        } else {
            self.address.format()
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Session flags. Not a security boundary - a convenience latch for the
/// login gate and the first-run setup wizard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub is_authenticated: bool,

    #[serde(default)]
    pub user_email: Option<String>,

    #[serde(default)]
    pub setup_complete: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        let rate = TaxRate::from_percentage(8.25);
        assert_eq!(rate.bps(), 825);
    }

    #[test]
    fn test_tax_rate_default_is_eighteen_percent() {
        assert_eq!(TaxRate::default().bps(), 1800);
    }

    #[test]
    fn test_line_item_from_product_copies_price() {
        let product = Product {
            id: "p-1".to_string(),
            name: "Widget".to_string(),
            description: String::new(),
            hsn_sac: DEFAULT_HSN_SAC.to_string(),
            price_cents: 1099,
            unit: "pcs".to_string(),
            tax_rate_bps: 1800,
        };
        let item = LineItem::from_product(&product, 3);
        assert_eq!(item.unit_price_cents, 1099);
        assert_eq!(item.line_subtotal().cents(), 3297);
    }

    #[test]
    fn test_product_deserializes_with_missing_optional_fields() {
        // A record saved before hsn_sac/tax_rate_bps existed must still load
        let json = r#"{"id":"p-1","name":"Widget","priceCents":1099}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.hsn_sac, DEFAULT_HSN_SAC);
        assert_eq!(product.tax_rate_bps, 1800);
        assert_eq!(product.unit, "pcs");
    }

    #[test]
    fn test_invoice_status_roundtrip() {
        let json = serde_json::to_string(&InvoiceStatus::Paid).unwrap();
        assert_eq!(json, "\"paid\"");
        let status: InvoiceStatus = serde_json::from_str("\"sent\"").unwrap();
        assert_eq!(status, InvoiceStatus::Sent);
    }

    #[test]
    fn test_invoice_flattens_quote_fields() {
        let quote = Quote {
            quote_number: "Q-1".to_string(),
            client_name: "Acme".to_string(),
            client_email: String::new(),
            client_address: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            items: vec![],
            notes: String::new(),
            subtotal_cents: 0,
            tax_cents: 0,
            total_cents: 0,
        };
        let invoice = Invoice::from_quote(quote, Utc::now());
        let value = serde_json::to_value(&invoice).unwrap();

        // Quote fields sit at the top level of the invoice document
        assert_eq!(value["quoteNumber"], "Q-1");
        assert_eq!(value["status"], "draft");
        assert_eq!(invoice.id, "Q-1");
    }
}
