//! # Product Repository
//!
//! Catalog operations over the `products` document.
//!
//! ## Key Operations
//! - List / get / add / update / remove
//! - Legacy records (float prices, `igstRate`) upgraded on read

use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::repository::keys;
use crate::store::Store;
use crate::upgrade;
use quill_core::{Product, DEFAULT_HSN_SAC, DEFAULT_TAX_RATE_BPS, DEFAULT_UNIT};

/// Repository for product catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = store.products();
///
/// let id = repo.add("Aluminium Sheet", 1099, None).await?;
/// let all = repo.list().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: Store,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(store: Store) -> Self {
        ProductRepository { store }
    }

    /// Lists all catalog products.
    ///
    /// Legacy records are upgraded transparently; the upgraded shape is
    /// written back on the next save.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let Some(json) = self.store.get_raw(keys::PRODUCTS).await? else {
            return Ok(Vec::new());
        };

        let products = upgrade::upgrade_products(&json).map_err(|source| {
            StoreError::CorruptDocument {
                key: keys::PRODUCTS.to_string(),
                source,
            }
        })?;

        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get(&self, id: &str) -> StoreResult<Option<Product>> {
        let products = self.list().await?;
        Ok(products.into_iter().find(|p| p.id == id))
    }

    /// Adds a new product and returns its generated ID.
    pub async fn add(&self, mut product: Product) -> StoreResult<String> {
        if product.id.is_empty() {
            product.id = Uuid::new_v4().to_string();
        }
        let id = product.id.clone();

        let mut products = self.list().await?;
        products.push(product);
        self.replace_all(&products).await?;

        debug!(id = %id, "Product added");
        Ok(id)
    }

    /// Creates and adds a product from its essentials, with catalog
    /// defaults for the rest.
    pub async fn add_new(
        &self,
        name: &str,
        price_cents: i64,
        tax_rate_bps: Option<u32>,
    ) -> StoreResult<String> {
        self.add(Product {
            id: String::new(),
            name: name.to_string(),
            description: String::new(),
            hsn_sac: DEFAULT_HSN_SAC.to_string(),
            price_cents,
            unit: DEFAULT_UNIT.to_string(),
            tax_rate_bps: tax_rate_bps.unwrap_or(DEFAULT_TAX_RATE_BPS),
        })
        .await
    }

    /// Updates an existing product in place.
    ///
    /// ## Errors
    /// * `NotFound` - No product with the given ID exists
    pub async fn update(&self, product: Product) -> StoreResult<()> {
        let mut products = self.list().await?;

        let slot = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| StoreError::not_found("Product", &product.id))?;
        *slot = product;

        self.replace_all(&products).await
    }

    /// Removes a product by ID.
    ///
    /// Quotes referencing the removed product keep working: their copied
    /// prices are unaffected and the dangling reference falls back to the
    /// default tax rate.
    ///
    /// ## Errors
    /// * `NotFound` - No product with the given ID exists
    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        let mut products = self.list().await?;
        let before = products.len();
        products.retain(|p| p.id != id);

        if products.len() == before {
            return Err(StoreError::not_found("Product", id));
        }

        self.replace_all(&products).await?;
        debug!(id = %id, "Product removed");
        Ok(())
    }

    /// Rewrites the whole collection.
    async fn replace_all(&self, products: &[Product]) -> StoreResult<()> {
        let json = serde_json::to_string(products).map_err(StoreError::Encode)?;
        self.store.put_raw(keys::PRODUCTS, &json).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    async fn test_store() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let store = test_store().await;
        assert!(store.products().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_and_get() {
        let store = test_store().await;
        let repo = store.products();

        let id = repo.add_new("Aluminium Sheet", 1099, None).await.unwrap();

        let product = repo.get(&id).await.unwrap().unwrap();
        assert_eq!(product.name, "Aluminium Sheet");
        assert_eq!(product.price_cents, 1099);
        assert_eq!(product.tax_rate_bps, 1800);
        assert_eq!(product.hsn_sac, "7607");
    }

    #[tokio::test]
    async fn test_update() {
        let store = test_store().await;
        let repo = store.products();

        let id = repo.add_new("Widget", 500, None).await.unwrap();
        let mut product = repo.get(&id).await.unwrap().unwrap();
        product.price_cents = 750;
        repo.update(product).await.unwrap();

        assert_eq!(repo.get(&id).await.unwrap().unwrap().price_cents, 750);
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let store = test_store().await;
        let err = store.products().remove("no-such-id").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_legacy_document_upgraded_on_read() {
        let store = test_store().await;
        store
            .put_raw(
                keys::PRODUCTS,
                r#"[{"id":"p-1","name":"Old","price":10.99,"igstRate":18}]"#,
            )
            .await
            .unwrap();

        let products = store.products().list().await.unwrap();
        assert_eq!(products[0].price_cents, 1099);
        assert_eq!(products[0].tax_rate_bps, 1800);
    }
}
