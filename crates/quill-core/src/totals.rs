//! # Quote Totals Engine
//!
//! Pure, deterministic computation of every money figure shown on a quote.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Totals Computation                                │
//! │                                                                         │
//! │  items: [LineItem]          resolve_tax_rate: product_id → TaxRate?    │
//! │       │                            │                                    │
//! │       ▼                            ▼                                    │
//! │  per line:  line_subtotal = qty × unit_price                           │
//! │             line_tax      = line_subtotal × rate/100  (per-product     │
//! │                             rate; DANGLING id → 18% fallback)          │
//! │             line_total    = line_subtotal + line_tax                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal = Σ line_subtotal                                            │
//! │  tax_total = Σ line_tax        ──►  TaxSplit: cgst = sgst-ish halves   │
//! │  total = subtotal + tax_total        (cgst + sgst == tax_total EXACT)  │
//! │                                                                         │
//! │  No side effects. O(n). Safe to call on every edit.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::{LineItem, Product, TaxRate};

// =============================================================================
// Output Records
// =============================================================================

/// Per-line money figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTotals {
    /// quantity × unit price.
    pub line_subtotal: Money,
    /// line_subtotal at the item's resolved tax rate.
    pub line_tax: Money,
    /// line_subtotal + line_tax.
    pub line_total: Money,
}

/// Aggregate money figures for a whole quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTotals {
    /// Σ line_subtotal.
    pub subtotal: Money,
    /// Σ line_tax, each line at its own product's rate.
    pub tax_total: Money,
    /// subtotal + tax_total.
    pub total: Money,
    /// One entry per input line, in input order.
    pub per_line: Vec<LineTotals>,
}

impl QuoteTotals {
    /// Totals for an empty item list: all zero.
    pub fn empty() -> Self {
        QuoteTotals {
            subtotal: Money::zero(),
            tax_total: Money::zero(),
            total: Money::zero(),
            per_line: Vec::new(),
        }
    }

    /// The presentational CGST/SGST decomposition of the tax total.
    pub fn tax_split(&self) -> TaxSplit {
        TaxSplit::of(self.tax_total)
    }
}

// =============================================================================
// Tax Split (presentation)
// =============================================================================

/// Two co-equal halves of the aggregate tax, used for regional
/// compliance-style quote layouts (CGST/SGST).
///
/// This is a presentational decomposition of `tax_total`, not an
/// independent computation: `cgst + sgst == tax_total` exactly, with any
/// odd cent landing on the SGST half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSplit {
    pub cgst: Money,
    pub sgst: Money,
}

impl TaxSplit {
    /// Halves the aggregate tax.
    pub fn of(tax_total: Money) -> Self {
        let (cgst, sgst) = tax_total.split_half();
        TaxSplit { cgst, sgst }
    }
}

// =============================================================================
// The Engine
// =============================================================================

/// Computes all money figures for a quote.
///
/// ## Arguments
/// * `items` - ordered line items (quantity, unit price, product reference)
/// * `resolve_tax_rate` - lookup from product id to its configured rate;
///   `None` means the reference is unresolved (deleted product, empty id)
///   and the default 18% rate applies. Never an error - totals must stay
///   computable with stale references.
///
/// ## Edge Cases
/// - Empty item list: every output is zero.
/// - Zero/negative quantity or price: not rejected here (validation runs
///   before values reach a draft); integer math keeps the output well
///   defined either way.
///
/// ## Example
/// ```rust
/// use quill_core::money::Money;
/// use quill_core::totals::compute_totals;
/// use quill_core::types::{LineItem, TaxRate};
///
/// let items = vec![LineItem {
///     product_id: "p-1".to_string(),
///     quantity: 3,
///     unit_price_cents: 10_000,
/// }];
/// let totals = compute_totals(&items, |_| Some(TaxRate::from_bps(1800)));
///
/// assert_eq!(totals.subtotal.cents(), 30_000); // $300.00
/// assert_eq!(totals.tax_total.cents(), 5_400); // $54.00
/// assert_eq!(totals.total.cents(), 35_400);    // $354.00
/// ```
pub fn compute_totals<F>(items: &[LineItem], resolve_tax_rate: F) -> QuoteTotals
where
    F: Fn(&str) -> Option<TaxRate>,
{
    let mut subtotal = Money::zero();
    let mut tax_total = Money::zero();
    let mut per_line = Vec::with_capacity(items.len());

    for item in items {
        let line_subtotal = item.line_subtotal();
        let rate = resolve_tax_rate(&item.product_id).unwrap_or_default();
        let line_tax = line_subtotal.calculate_tax(rate);

        subtotal += line_subtotal;
        tax_total += line_tax;
        per_line.push(LineTotals {
            line_subtotal,
            line_tax,
            line_total: line_subtotal + line_tax,
        });
    }

    QuoteTotals {
        subtotal,
        tax_total,
        total: subtotal + tax_total,
        per_line,
    }
}

/// Builds a tax-rate resolver over a product catalog slice.
///
/// ## Example
/// ```rust,ignore
/// let resolver = catalog_resolver(&products);
/// let totals = compute_totals(&quote.items, resolver);
/// ```
pub fn catalog_resolver(products: &[Product]) -> impl Fn(&str) -> Option<TaxRate> + '_ {
    move |product_id: &str| {
        products
            .iter()
            .find(|p| p.id == product_id)
            .map(Product::tax_rate)
    }
}

/// Looks up a product's display name, falling back to "Unknown Product"
/// for dangling references. Lives beside the resolver because renderers
/// need the same weak-reference policy the engine applies to rates.
pub fn product_display_name<'a>(products: &'a [Product], product_id: &str) -> &'a str {
    products
        .iter()
        .find(|p| p.id == product_id)
        .map(|p| p.name.as_str())
        .unwrap_or("Unknown Product")
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_HSN_SAC;

    fn item(product_id: &str, quantity: i64, unit_price_cents: i64) -> LineItem {
        LineItem {
            product_id: product_id.to_string(),
            quantity,
            unit_price_cents,
        }
    }

    fn product(id: &str, price_cents: i64, tax_rate_bps: u32) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            hsn_sac: DEFAULT_HSN_SAC.to_string(),
            price_cents,
            unit: "pcs".to_string(),
            tax_rate_bps,
        }
    }

    #[test]
    fn test_empty_items_all_zero() {
        let totals = compute_totals(&[], |_| None);
        assert_eq!(totals.subtotal, Money::zero());
        assert_eq!(totals.tax_total, Money::zero());
        assert_eq!(totals.total, Money::zero());
        assert!(totals.per_line.is_empty());

        let split = totals.tax_split();
        assert_eq!(split.cgst + split.sgst, Money::zero());
    }

    #[test]
    fn test_single_item_at_eighteen_percent() {
        // 3 × $100.00 at 18% ⇒ subtotal $300.00, tax $54.00, total $354.00
        let items = vec![item("p-1", 3, 10_000)];
        let totals = compute_totals(&items, |_| Some(TaxRate::from_bps(1800)));

        assert_eq!(totals.subtotal.cents(), 30_000);
        assert_eq!(totals.tax_total.cents(), 5_400);
        assert_eq!(totals.total.cents(), 35_400);

        assert_eq!(totals.per_line.len(), 1);
        assert_eq!(totals.per_line[0].line_subtotal.cents(), 30_000);
        assert_eq!(totals.per_line[0].line_tax.cents(), 5_400);
        assert_eq!(totals.per_line[0].line_total.cents(), 35_400);
    }

    #[test]
    fn test_mixed_rates_tax_only_from_taxed_item() {
        // 2 × $50.00 at 18%, 1 × $200.00 at 0%
        // ⇒ subtotal $300.00, tax $18.00 (first item only), total $318.00
        let catalog = vec![product("p-18", 5_000, 1800), product("p-0", 20_000, 0)];
        let items = vec![item("p-18", 2, 5_000), item("p-0", 1, 20_000)];

        let totals = compute_totals(&items, catalog_resolver(&catalog));

        assert_eq!(totals.subtotal.cents(), 30_000);
        assert_eq!(totals.tax_total.cents(), 1_800);
        assert_eq!(totals.total.cents(), 31_800);

        assert_eq!(totals.per_line[0].line_tax.cents(), 1_800);
        assert_eq!(totals.per_line[1].line_tax.cents(), 0);
    }

    #[test]
    fn test_dangling_reference_uses_default_rate() {
        // Product was deleted from the catalog: the line still computes,
        // at the 18% fallback
        let catalog: Vec<Product> = vec![];
        let items = vec![item("deleted-product", 1, 10_000)];

        let totals = compute_totals(&items, catalog_resolver(&catalog));

        assert_eq!(totals.subtotal.cents(), 10_000);
        assert_eq!(totals.tax_total.cents(), 1_800);
        assert_eq!(totals.total.cents(), 11_800);
    }

    #[test]
    fn test_empty_product_id_uses_default_rate() {
        let items = vec![item("", 2, 500)];
        let totals = compute_totals(&items, |_| None);
        assert_eq!(totals.subtotal.cents(), 1_000);
        assert_eq!(totals.tax_total.cents(), 180);
    }

    #[test]
    fn test_subtotal_is_exact_sum() {
        let items = vec![item("a", 7, 1_234), item("b", 11, 999), item("c", 1, 1)];
        let totals = compute_totals(&items, |_| Some(TaxRate::zero()));

        let expected: i64 = items
            .iter()
            .map(|i| i.quantity * i.unit_price_cents)
            .sum();
        assert_eq!(totals.subtotal.cents(), expected);
        assert_eq!(totals.tax_total.cents(), 0);
        assert_eq!(totals.total.cents(), expected);
    }

    #[test]
    fn test_total_equals_subtotal_plus_tax() {
        let catalog = vec![
            product("a", 333, 825),
            product("b", 10_000, 1800),
            product("c", 1, 2500),
        ];
        let items = vec![item("a", 3, 333), item("b", 2, 10_000), item("c", 99, 1)];

        let totals = compute_totals(&items, catalog_resolver(&catalog));
        assert_eq!(totals.total, totals.subtotal + totals.tax_total);

        let per_line_tax: i64 = totals.per_line.iter().map(|l| l.line_tax.cents()).sum();
        assert_eq!(totals.tax_total.cents(), per_line_tax);
    }

    #[test]
    fn test_tax_split_sums_back_exactly() {
        // Odd tax totals must not lose a cent across the split
        let items = vec![item("a", 1, 5)]; // $0.05 at 18% ⇒ 1 cent tax
        let totals = compute_totals(&items, |_| Some(TaxRate::from_bps(1800)));
        assert_eq!(totals.tax_total.cents(), 1);

        let split = totals.tax_split();
        assert_eq!(split.cgst + split.sgst, totals.tax_total);
        assert_eq!(split.cgst.cents(), 0);
        assert_eq!(split.sgst.cents(), 1);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let items = vec![item("a", 4, 2_500)];
        let first = compute_totals(&items, |_| Some(TaxRate::from_bps(1800)));
        let second = compute_totals(&items, |_| Some(TaxRate::from_bps(1800)));
        assert_eq!(first, second);
    }

    #[test]
    fn test_product_display_name_fallback() {
        let catalog = vec![product("p-1", 100, 1800)];
        assert_eq!(product_display_name(&catalog, "p-1"), "Product p-1");
        assert_eq!(product_display_name(&catalog, "ghost"), "Unknown Product");
        assert_eq!(product_display_name(&catalog, ""), "Unknown Product");
    }
}
