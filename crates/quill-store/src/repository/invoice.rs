//! # Invoice Repository
//!
//! Invoices under the `invoices` document, seeded from saved quotes.
//!
//! ## One-Time Migration
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One-Time Migration on Read                           │
//! │                                                                         │
//! │  list() is called                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Invoice document exists? ── yes → return it, no derivation             │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  Quote document exists? ── no → nothing to migrate, return empty        │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  Write one draft invoice per saved quote, persist, return               │
//! │                                                                         │
//! │  Once the invoice document is written it is authoritative: status       │
//! │  edits and removals stick, and quotes saved later never spawn           │
//! │  invoices on their own.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::keys;
use crate::store::Store;
use crate::upgrade;
use quill_core::{Invoice, InvoiceStatus};

/// Repository for invoices.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    store: Store,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(store: Store) -> Self {
        InvoiceRepository { store }
    }

    /// Lists all invoices.
    ///
    /// The first read against a store that has quotes but no invoice
    /// document migrates every saved quote into a draft invoice and
    /// persists the result. The stored document is authoritative after
    /// that: this never derives again.
    pub async fn list(&self) -> StoreResult<Vec<Invoice>> {
        if self.store.get_raw(keys::INVOICES).await?.is_some() {
            return self.load().await;
        }

        // Migration only applies once a quote document exists; writing an
        // empty invoice document before then would block it.
        if self.store.get_raw(keys::QUOTES).await?.is_none() {
            return Ok(Vec::new());
        }

        let quotes = self.store.quotes().list().await?;
        let now = Utc::now();
        let invoices: Vec<Invoice> = quotes
            .into_iter()
            .map(|quote| Invoice::from_quote(quote, now))
            .collect();

        self.replace_all(&invoices).await?;
        debug!(count = invoices.len(), "Migrated saved quotes to draft invoices");
        Ok(invoices)
    }

    /// Gets an invoice by ID (the originating quote's number).
    pub async fn get(&self, id: &str) -> StoreResult<Option<Invoice>> {
        let invoices = self.list().await?;
        Ok(invoices.into_iter().find(|i| i.id == id))
    }

    /// Sets an invoice's workflow status and touches its update time.
    ///
    /// ## Errors
    /// * `NotFound` - No invoice with the given ID exists
    pub async fn set_status(&self, id: &str, status: InvoiceStatus) -> StoreResult<()> {
        let mut invoices = self.list().await?;

        let invoice = invoices
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::not_found("Invoice", id))?;

        invoice.status = status;
        invoice.updated_at = Utc::now();

        self.replace_all(&invoices).await?;
        debug!(id = %id, status = status.as_str(), "Invoice status updated");
        Ok(())
    }

    /// Removes an invoice by ID. Removal is permanent: a removed invoice
    /// is never re-derived, even while its originating quote exists.
    ///
    /// ## Errors
    /// * `NotFound` - No invoice with the given ID exists
    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        let mut invoices = self.load().await?;
        let before = invoices.len();
        invoices.retain(|i| i.id != id);

        if invoices.len() == before {
            return Err(StoreError::not_found("Invoice", id));
        }

        self.replace_all(&invoices).await?;
        debug!(id = %id, "Invoice removed");
        Ok(())
    }

    /// Loads the stored invoice document without derivation.
    async fn load(&self) -> StoreResult<Vec<Invoice>> {
        let Some(json) = self.store.get_raw(keys::INVOICES).await? else {
            return Ok(Vec::new());
        };

        upgrade::upgrade_invoices(&json).map_err(|source| StoreError::CorruptDocument {
            key: keys::INVOICES.to_string(),
            source,
        })
    }

    /// Rewrites the whole collection.
    async fn replace_all(&self, invoices: &[Invoice]) -> StoreResult<()> {
        let json = serde_json::to_string(invoices).map_err(StoreError::Encode)?;
        self.store.put_raw(keys::INVOICES, &json).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use chrono::NaiveDate;
    use quill_core::Quote;

    fn sample_quote(number: &str) -> Quote {
        Quote {
            quote_number: number.to_string(),
            client_name: "Acme Corp".to_string(),
            client_email: String::new(),
            client_address: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            items: vec![],
            notes: String::new(),
            subtotal_cents: 30_000,
            tax_cents: 5_400,
            total_cents: 35_400,
        }
    }

    #[tokio::test]
    async fn test_invoices_derived_from_quotes() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.quotes().save(sample_quote("Q-1")).await.unwrap();
        store.quotes().save(sample_quote("Q-2")).await.unwrap();

        let invoices = store.invoices().list().await.unwrap();
        assert_eq!(invoices.len(), 2);
        assert!(invoices.iter().all(|i| i.status == InvoiceStatus::Draft));
        assert_eq!(invoices[0].quote.total_cents, 35_400);
    }

    #[tokio::test]
    async fn test_derivation_is_one_time() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.quotes().save(sample_quote("Q-1")).await.unwrap();

        let repo = store.invoices();
        repo.list().await.unwrap();
        repo.set_status("Q-1", InvoiceStatus::Paid).await.unwrap();

        // A later derivation pass must not reset the status to draft
        let invoices = repo.list().await.unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_set_status_touches_updated_at() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.quotes().save(sample_quote("Q-1")).await.unwrap();

        let repo = store.invoices();
        let before = repo.get("Q-1").await.unwrap().unwrap();
        repo.set_status("Q-1", InvoiceStatus::Sent).await.unwrap();
        let after = repo.get("Q-1").await.unwrap().unwrap();

        assert!(after.updated_at >= before.updated_at);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn test_set_status_missing_is_not_found() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let err = store
            .invoices()
            .set_status("ghost", InvoiceStatus::Paid)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_removed_invoice_stays_removed() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.quotes().save(sample_quote("Q-1")).await.unwrap();
        store.quotes().save(sample_quote("Q-2")).await.unwrap();

        let repo = store.invoices();
        repo.list().await.unwrap();
        repo.remove("Q-1").await.unwrap();

        // The quote still exists, but removal is permanent
        let invoices = repo.list().await.unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].id, "Q-2");
    }

    #[tokio::test]
    async fn test_no_migration_when_invoice_document_exists() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.put_raw(keys::INVOICES, "[]").await.unwrap();
        store.quotes().save(sample_quote("Q-NEW")).await.unwrap();

        // The existing (empty) invoice document is authoritative
        assert!(store.invoices().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_quotes_saved_after_migration_stay_quotes() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store.quotes().save(sample_quote("Q-1")).await.unwrap();

        let repo = store.invoices();
        assert_eq!(repo.list().await.unwrap().len(), 1);

        store.quotes().save(sample_quote("Q-2")).await.unwrap();
        let invoices = repo.list().await.unwrap();
        assert_eq!(invoices.len(), 1);
        assert_eq!(invoices[0].id, "Q-1");
    }

    #[tokio::test]
    async fn test_empty_read_does_not_block_later_migration() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.invoices();

        // Nothing saved yet: empty, and no invoice document is written
        assert!(repo.list().await.unwrap().is_empty());

        store.quotes().save(sample_quote("Q-1")).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }
}
