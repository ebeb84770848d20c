//! # Legacy Record Upgrades
//!
//! Earlier generations of Quill stored money as floating-point currency
//! amounts and the company address as one free-text block. This module
//! upgrades those documents to the current shapes at load time.
//!
//! ## Upgrade Pass
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Read-Time Upgrade                                   │
//! │                                                                         │
//! │  kv_store document (JSON)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Try current shape first ──────────────► use as-is                      │
//! │       │ (no match)                                                      │
//! │       ▼                                                                 │
//! │  Try legacy shape ──► convert ─────────► upgraded record                │
//! │       │ (no match)        float price → integer cents                   │
//! │       ▼                   igstRate    → tax_rate_bps (default 18%)      │
//! │  CorruptDocument          free text   → structured + preserved verbatim │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Upgrades are applied on read only. The upgraded shape is written back
//! the next time the collection is saved, so the store converges without
//! a one-shot migration over user data.

use serde::Deserialize;

use quill_core::{
    Address, Company, Invoice, InvoiceStatus, LineItem, Product, Quote, DEFAULT_HSN_SAC,
    DEFAULT_TAX_RATE_BPS, DEFAULT_UNIT,
};

/// Converts a floating-point currency amount to integer cents.
///
/// Legacy documents stored `10.99` meaning $10.99. Round half away from
/// zero to absorb float representation error (e.g. 10.99 stored as
/// 10.989999...).
fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Converts a legacy percentage tax rate (e.g. 18.0) to basis points.
fn to_bps(rate: f64) -> u32 {
    (rate * 100.0).round() as u32
}

// =============================================================================
// Product
// =============================================================================

/// Legacy product: price as a float currency amount, tax rate as a
/// percentage under `igstRate`, no unit or HSN/SAC on the oldest records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyProduct {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    hsn_sac: Option<String>,
    price: f64,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    igst_rate: Option<f64>,
}

impl From<LegacyProduct> for Product {
    fn from(legacy: LegacyProduct) -> Self {
        Product {
            id: legacy.id,
            name: legacy.name,
            description: legacy.description,
            hsn_sac: legacy.hsn_sac.unwrap_or_else(|| DEFAULT_HSN_SAC.to_string()),
            price_cents: to_cents(legacy.price),
            unit: legacy.unit.unwrap_or_else(|| DEFAULT_UNIT.to_string()),
            tax_rate_bps: legacy.igst_rate.map(to_bps).unwrap_or(DEFAULT_TAX_RATE_BPS),
        }
    }
}

/// Either shape of a stored product.
///
/// Untagged: the current shape is tried first (it requires `priceCents`,
/// which legacy records lack), then the legacy shape (requires `price`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductRecord {
    Current(Product),
    Legacy(LegacyProduct),
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        match record {
            ProductRecord::Current(p) => p,
            ProductRecord::Legacy(l) => l.into(),
        }
    }
}

/// Decodes a products document, upgrading legacy records in place.
pub fn upgrade_products(json: &str) -> Result<Vec<Product>, serde_json::Error> {
    let records: Vec<ProductRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Product::from).collect())
}

// =============================================================================
// Quote
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyLineItem {
    #[serde(default)]
    product_id: String,
    quantity: i64,
    unit_price: f64,
}

impl From<LegacyLineItem> for LineItem {
    fn from(legacy: LegacyLineItem) -> Self {
        LineItem {
            product_id: legacy.product_id,
            quantity: legacy.quantity,
            unit_price_cents: to_cents(legacy.unit_price),
        }
    }
}

/// Legacy quote: float money in `subtotal`/`tax`/`total` and in the
/// line items, and `id` instead of `quoteNumber` on the oldest records.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyQuote {
    #[serde(alias = "id", default)]
    quote_number: String,
    client_name: String,
    #[serde(default)]
    client_email: String,
    #[serde(default)]
    client_address: String,
    date: chrono::NaiveDate,
    valid_until: chrono::NaiveDate,
    items: Vec<LegacyLineItem>,
    #[serde(default)]
    notes: String,
    subtotal: f64,
    tax: f64,
    total: f64,
}

impl From<LegacyQuote> for Quote {
    fn from(legacy: LegacyQuote) -> Self {
        Quote {
            quote_number: legacy.quote_number,
            client_name: legacy.client_name,
            client_email: legacy.client_email,
            client_address: legacy.client_address,
            date: legacy.date,
            valid_until: legacy.valid_until,
            items: legacy.items.into_iter().map(LineItem::from).collect(),
            notes: legacy.notes,
            subtotal_cents: to_cents(legacy.subtotal),
            tax_cents: to_cents(legacy.tax),
            total_cents: to_cents(legacy.total),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuoteRecord {
    Current(Quote),
    Legacy(LegacyQuote),
}

impl From<QuoteRecord> for Quote {
    fn from(record: QuoteRecord) -> Self {
        match record {
            QuoteRecord::Current(q) => q,
            QuoteRecord::Legacy(l) => l.into(),
        }
    }
}

/// Decodes a quotes document, upgrading legacy records in place.
pub fn upgrade_quotes(json: &str) -> Result<Vec<Quote>, serde_json::Error> {
    let records: Vec<QuoteRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Quote::from).collect())
}

// =============================================================================
// Invoice
// =============================================================================

/// Legacy invoice: a legacy quote's fields flattened alongside the
/// invoice envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyInvoice {
    id: String,
    #[serde(flatten)]
    quote: LegacyQuote,
    #[serde(default)]
    status: InvoiceStatus,
    #[serde(default)]
    created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl From<LegacyInvoice> for Invoice {
    fn from(legacy: LegacyInvoice) -> Self {
        let mut quote: Quote = legacy.quote.into();
        // The oldest invoices carried only `id` (equal to the quote
        // number), which the envelope consumes before the flattened
        // quote sees it.
        if quote.quote_number.is_empty() {
            quote.quote_number = legacy.id.clone();
        }
        // Records written before timestamps existed get midnight UTC of
        // the quote date, keeping the upgrade deterministic.
        let fallback = quote
            .date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .unwrap_or_else(chrono::Utc::now);

        Invoice {
            id: legacy.id,
            quote,
            status: legacy.status,
            created_at: legacy.created_at.unwrap_or(fallback),
            updated_at: legacy.updated_at.unwrap_or(fallback),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InvoiceRecord {
    Current(Invoice),
    Legacy(LegacyInvoice),
}

impl From<InvoiceRecord> for Invoice {
    fn from(record: InvoiceRecord) -> Self {
        match record {
            InvoiceRecord::Current(i) => i,
            InvoiceRecord::Legacy(l) => l.into(),
        }
    }
}

/// Decodes an invoices document, upgrading legacy records in place.
pub fn upgrade_invoices(json: &str) -> Result<Vec<Invoice>, serde_json::Error> {
    let records: Vec<InvoiceRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Invoice::from).collect())
}

// =============================================================================
// Company
// =============================================================================

/// Legacy company profile: the address is one free-text block.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyCompany {
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    website: String,
    #[serde(default)]
    tax_id: String,
    address: String,
}

impl From<LegacyCompany> for Company {
    fn from(legacy: LegacyCompany) -> Self {
        // Lossy by nature: the first line becomes the street, the rest
        // cannot be recovered into fields. The verbatim original is kept
        // so nothing is silently dropped.
        let structured = Address::parse_legacy(&legacy.address);
        let preserved = if legacy.address.trim().is_empty() {
            None
        } else {
            Some(legacy.address)
        };

        Company {
            name: legacy.name,
            email: legacy.email,
            phone: legacy.phone,
            website: legacy.website,
            tax_id: legacy.tax_id,
            address: structured,
            legacy_address: preserved,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CompanyRecord {
    Current(Company),
    Legacy(LegacyCompany),
}

impl From<CompanyRecord> for Company {
    fn from(record: CompanyRecord) -> Self {
        match record {
            CompanyRecord::Current(c) => c,
            CompanyRecord::Legacy(l) => l.into(),
        }
    }
}

/// Decodes a company document, upgrading the legacy shape in place.
pub fn upgrade_company(json: &str) -> Result<Company, serde_json::Error> {
    let record: CompanyRecord = serde_json::from_str(json)?;
    Ok(record.into())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_product_upgrade() {
        let json = r#"[{
            "id": "p-1",
            "name": "Aluminium Sheet",
            "price": 10.99,
            "igstRate": 18
        }]"#;

        let products = upgrade_products(json).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].price_cents, 1099);
        assert_eq!(products[0].tax_rate_bps, 1800);
        assert_eq!(products[0].hsn_sac, "7607");
        assert_eq!(products[0].unit, "pcs");
    }

    #[test]
    fn test_legacy_product_missing_rate_defaults_to_eighteen_percent() {
        let json = r#"[{"id": "p-1", "name": "Widget", "price": 5.0}]"#;

        let products = upgrade_products(json).unwrap();
        assert_eq!(products[0].tax_rate_bps, 1800);
    }

    #[test]
    fn test_current_product_passes_through() {
        let json = r#"[{
            "id": "p-1",
            "name": "Widget",
            "priceCents": 1099,
            "taxRateBps": 500
        }]"#;

        let products = upgrade_products(json).unwrap();
        assert_eq!(products[0].price_cents, 1099);
        assert_eq!(products[0].tax_rate_bps, 500);
    }

    #[test]
    fn test_float_representation_error_rounds_cleanly() {
        // 10.99 is not exactly representable in binary floating point
        let json = r#"[{"id": "p", "name": "W", "price": 10.989999999999998}]"#;
        let products = upgrade_products(json).unwrap();
        assert_eq!(products[0].price_cents, 1099);
    }

    #[test]
    fn test_legacy_quote_upgrade() {
        let json = r#"[{
            "id": "Q-1724990400000",
            "clientName": "Acme Corp",
            "date": "2025-01-15",
            "validUntil": "2025-02-14",
            "items": [{"productId": "p-1", "quantity": 3, "unitPrice": 100.0}],
            "subtotal": 300.0,
            "tax": 54.0,
            "total": 354.0
        }]"#;

        let quotes = upgrade_quotes(json).unwrap();
        assert_eq!(quotes[0].quote_number, "Q-1724990400000");
        assert_eq!(quotes[0].items[0].unit_price_cents, 10_000);
        assert_eq!(quotes[0].subtotal_cents, 30_000);
        assert_eq!(quotes[0].tax_cents, 5_400);
        assert_eq!(quotes[0].total_cents, 35_400);
    }

    #[test]
    fn test_legacy_invoice_without_timestamps() {
        let json = r#"[{
            "id": "Q-1",
            "quoteNumber": "Q-1",
            "clientName": "Acme",
            "date": "2025-01-15",
            "validUntil": "2025-02-14",
            "items": [],
            "subtotal": 0,
            "tax": 0,
            "total": 0,
            "status": "sent"
        }]"#;

        let invoices = upgrade_invoices(json).unwrap();
        assert_eq!(invoices[0].status, InvoiceStatus::Sent);
        assert_eq!(
            invoices[0].created_at.date_naive(),
            chrono::NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_oldest_invoice_with_id_only_recovers_quote_number() {
        let json = r#"[{
            "id": "Q-1724990400000",
            "clientName": "Acme",
            "date": "2025-01-15",
            "validUntil": "2025-02-14",
            "items": [],
            "subtotal": 0,
            "tax": 0,
            "total": 0
        }]"#;

        let invoices = upgrade_invoices(json).unwrap();
        assert_eq!(invoices[0].quote.quote_number, "Q-1724990400000");
        assert_eq!(invoices[0].status, InvoiceStatus::Draft);
    }

    #[test]
    fn test_legacy_company_preserves_free_text_address() {
        let json = r#"{
            "name": "Acme Corp",
            "email": "hello@acme.test",
            "address": "123 Main St\nSpringfield, IL 62704"
        }"#;

        let company = upgrade_company(json).unwrap();
        assert_eq!(company.address.street, "123 Main St");
        assert_eq!(
            company.legacy_address.as_deref(),
            Some("123 Main St\nSpringfield, IL 62704")
        );
    }

    #[test]
    fn test_current_company_passes_through() {
        let json = r#"{
            "name": "Acme Corp",
            "address": {
                "street": "123 Main St",
                "city": "Springfield",
                "state": "IL",
                "zipCode": "62704"
            }
        }"#;

        let company = upgrade_company(json).unwrap();
        assert_eq!(company.address.city, "Springfield");
        assert_eq!(company.legacy_address, None);
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        assert!(upgrade_products("not json").is_err());
    }
}
