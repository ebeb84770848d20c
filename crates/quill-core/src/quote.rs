//! # Quote Draft
//!
//! In-memory editing state for a quote before it is saved.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Quote Draft Operations                               │
//! │                                                                         │
//! │  User Action               Draft Method            State Change         │
//! │  ───────────               ────────────            ────────────         │
//! │                                                                         │
//! │  New quote ──────────────► QuoteDraft::new() ────► defaults             │
//! │                                                                         │
//! │  Add row ────────────────► add_item() ───────────► blank item, qty 1    │
//! │                                                                         │
//! │  Pick product ───────────► select_product() ─────► id set, price COPIED │
//! │                                                                         │
//! │  Change qty/price ───────► set_quantity() /                             │
//! │                            set_unit_price() ─────► field updated        │
//! │                                                                         │
//! │  Remove row ─────────────► remove_item() ────────► row dropped          │
//! │                                                                         │
//! │  Save / preview ─────────► finalize() ───────────► validated Quote      │
//! │                                                    snapshot (or error,  │
//! │                                                    draft untouched)     │
//! │                                                                         │
//! │  Totals are recomputed from scratch via the engine on demand; the       │
//! │  draft caches nothing.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::address::Address;
use crate::error::{CoreError, CoreResult};
use crate::totals::{compute_totals, QuoteTotals};
use crate::types::{LineItem, Product, Quote, TaxRate};
use crate::validation::{
    validate_client_name, validate_email, validate_price_cents, validate_quantity,
};
use crate::{MAX_QUOTE_ITEMS, QUOTE_VALIDITY_DAYS};

/// A quote under construction.
///
/// The client address is held in structured form while editing; it is only
/// flattened to display text when the draft is finalized into a [`Quote`].
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub quote_number: String,
    pub client_name: String,
    pub client_email: String,
    pub client_address: Address,
    pub date: NaiveDate,
    pub valid_until: NaiveDate,
    pub items: Vec<LineItem>,
    pub notes: String,
}

impl QuoteDraft {
    /// Creates a draft with generated defaults: timestamp-derived number,
    /// today's date, validity 30 days out, empty item list.
    pub fn new(now: DateTime<Utc>) -> Self {
        QuoteDraft {
            quote_number: format!("Q-{}", now.timestamp_millis()),
            client_name: String::new(),
            client_email: String::new(),
            client_address: Address::default(),
            date: now.date_naive(),
            valid_until: (now + Duration::days(QUOTE_VALIDITY_DAYS)).date_naive(),
            items: Vec::new(),
            notes: String::new(),
        }
    }

    /// Appends a blank line item (no product, quantity 1, zero price).
    ///
    /// ## Errors
    /// * `TooManyItems` - The draft is already at the line item cap
    pub fn add_item(&mut self) -> CoreResult<usize> {
        if self.items.len() >= MAX_QUOTE_ITEMS {
            return Err(CoreError::TooManyItems {
                max: MAX_QUOTE_ITEMS,
            });
        }
        self.items.push(LineItem {
            product_id: String::new(),
            quantity: 1,
            unit_price_cents: 0,
        });
        Ok(self.items.len() - 1)
    }

    /// Selects a catalog product for a line item, copying its current
    /// price. The price stays independently editable afterwards.
    pub fn select_product(&mut self, index: usize, product: &Product) -> CoreResult<()> {
        let item = self.item_mut(index)?;
        item.product_id = product.id.clone();
        item.unit_price_cents = product.price_cents;
        Ok(())
    }

    /// Sets a line item's quantity (positive, capped).
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;
        self.item_mut(index)?.quantity = quantity;
        Ok(())
    }

    /// Overrides a line item's unit price (non-negative).
    pub fn set_unit_price(&mut self, index: usize, cents: i64) -> CoreResult<()> {
        validate_price_cents(cents)?;
        self.item_mut(index)?.unit_price_cents = cents;
        Ok(())
    }

    /// Removes a line item.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<LineItem> {
        if index >= self.items.len() {
            return Err(CoreError::ItemIndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Current totals through the engine. Cheap; call on every edit.
    pub fn totals<F>(&self, resolve_tax_rate: F) -> QuoteTotals
    where
        F: Fn(&str) -> Option<TaxRate>,
    {
        compute_totals(&self.items, resolve_tax_rate)
    }

    /// Validates the draft and produces the immutable quote snapshot.
    ///
    /// ## Gate
    /// - client name required
    /// - client email well-formed if present
    /// - structured address must pass [`Address::validate`]
    ///
    /// On failure the draft is left untouched for correction; nothing is
    /// partially applied.
    pub fn finalize<F>(&self, resolve_tax_rate: F) -> CoreResult<Quote>
    where
        F: Fn(&str) -> Option<TaxRate>,
    {
        validate_client_name(&self.client_name)?;
        validate_email(&self.client_email)?;
        self.client_address
            .validate()
            .map_err(CoreError::InvalidAddress)?;

        let totals = self.totals(resolve_tax_rate);

        Ok(Quote {
            quote_number: self.quote_number.clone(),
            client_name: self.client_name.trim().to_string(),
            client_email: self.client_email.trim().to_string(),
            client_address: self.client_address.format(),
            date: self.date,
            valid_until: self.valid_until,
            items: self.items.clone(),
            notes: self.notes.clone(),
            subtotal_cents: totals.subtotal.cents(),
            tax_cents: totals.tax_total.cents(),
            total_cents: totals.total.cents(),
        })
    }

    fn item_mut(&mut self, index: usize) -> CoreResult<&mut LineItem> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CoreError::ItemIndexOutOfBounds { index, len })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
