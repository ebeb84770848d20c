//! # Quote Repository
//!
//! Finalized quote snapshots under the `quotes` document.
//!
//! ## Snapshot Semantics
//! A quote is edited in memory (see `quill_core::QuoteDraft`) and saved
//! as a whole. Saving a quote whose number already exists replaces that
//! snapshot; there is no partial update.

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::keys;
use crate::store::Store;
use crate::upgrade;
use quill_core::Quote;

/// Repository for finalized quotes.
#[derive(Debug, Clone)]
pub struct QuoteRepository {
    store: Store,
}

impl QuoteRepository {
    /// Creates a new QuoteRepository.
    pub fn new(store: Store) -> Self {
        QuoteRepository { store }
    }

    /// Lists all saved quotes, newest last (insertion order).
    ///
    /// Legacy records (float money) are upgraded on read.
    pub async fn list(&self) -> StoreResult<Vec<Quote>> {
        let Some(json) = self.store.get_raw(keys::QUOTES).await? else {
            return Ok(Vec::new());
        };

        let quotes = upgrade::upgrade_quotes(&json).map_err(|source| {
            StoreError::CorruptDocument {
                key: keys::QUOTES.to_string(),
                source,
            }
        })?;

        debug!(count = quotes.len(), "Loaded quotes");
        Ok(quotes)
    }

    /// Gets a quote by its number.
    pub async fn get(&self, quote_number: &str) -> StoreResult<Option<Quote>> {
        let quotes = self.list().await?;
        Ok(quotes.into_iter().find(|q| q.quote_number == quote_number))
    }

    /// Saves a quote snapshot.
    ///
    /// Replaces the existing snapshot with the same number, or appends
    /// if the number is new.
    pub async fn save(&self, quote: Quote) -> StoreResult<()> {
        let mut quotes = self.list().await?;

        match quotes
            .iter_mut()
            .find(|q| q.quote_number == quote.quote_number)
        {
            Some(slot) => {
                debug!(quote_number = %quote.quote_number, "Replacing quote snapshot");
                *slot = quote;
            }
            None => {
                debug!(quote_number = %quote.quote_number, "Saving new quote");
                quotes.push(quote);
            }
        }

        self.replace_all(&quotes).await
    }

    /// Removes a quote by number.
    ///
    /// ## Errors
    /// * `NotFound` - No quote with the given number exists
    pub async fn remove(&self, quote_number: &str) -> StoreResult<()> {
        let mut quotes = self.list().await?;
        let before = quotes.len();
        quotes.retain(|q| q.quote_number != quote_number);

        if quotes.len() == before {
            return Err(StoreError::not_found("Quote", quote_number));
        }

        self.replace_all(&quotes).await?;
        debug!(quote_number = %quote_number, "Quote removed");
        Ok(())
    }

    /// Rewrites the whole collection.
    async fn replace_all(&self, quotes: &[Quote]) -> StoreResult<()> {
        let json = serde_json::to_string(quotes).map_err(StoreError::Encode)?;
        self.store.put_raw(keys::QUOTES, &json).await
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
    use quill_core::LineItem;

    fn sample_quote(number: &str) -> Quote {
        Quote {
            quote_number: number.to_string(),
            client_name: "Acme Corp".to_string(),
            client_email: String::new(),
            client_address: "123 Main St\nSpringfield, IL 62704".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            valid_until: NaiveDate::from_ymd_opt(2025, 2, 14).unwrap(),
            items: vec![LineItem {
                product_id: "p-1".to_string(),
                quantity: 3,
                unit_price_cents: 10_000,
            }],
            notes: String::new(),
            subtotal_cents: 30_000,
            tax_cents: 5_400,
            total_cents: 35_400,
        }
    }

    #[tokio::test]
    async fn test_save_and_get() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.quotes();

        repo.save(sample_quote("Q-1")).await.unwrap();

        let quote = repo.get("Q-1").await.unwrap().unwrap();
        assert_eq!(quote.total_cents, 35_400);
    }

    #[tokio::test]
    async fn test_resave_replaces_snapshot() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.quotes();

        repo.save(sample_quote("Q-1")).await.unwrap();

        let mut edited = sample_quote("Q-1");
        edited.notes = "Net 30".to_string();
        repo.save(edited).await.unwrap();

        let quotes = repo.list().await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].notes, "Net 30");
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let err = store.quotes().remove("Q-ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_legacy_float_money_upgraded() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store
            .put_raw(
                keys::QUOTES,
                r#"[{
                    "id": "Q-1",
                    "clientName": "Acme",
                    "date": "2025-01-15",
                    "validUntil": "2025-02-14",
                    "items": [{"productId": "p-1", "quantity": 1, "unitPrice": 100.0}],
                    "subtotal": 100.0,
                    "tax": 18.0,
                    "total": 118.0
                }]"#,
            )
            .await
            .unwrap();

        let quotes = store.quotes().list().await.unwrap();
        assert_eq!(quotes[0].quote_number, "Q-1");
        assert_eq!(quotes[0].total_cents, 11_800);
    }
}
