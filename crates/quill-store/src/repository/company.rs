//! # Company Repository
//!
//! The company profile is a singleton record under the `companyData` key.
//! Saving replaces the whole profile; there is no partial update.

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::keys;
use crate::store::Store;
use crate::upgrade;
use quill_core::Company;

/// Repository for the company profile.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    store: Store,
}

impl CompanyRepository {
    /// Creates a new CompanyRepository.
    pub fn new(store: Store) -> Self {
        CompanyRepository { store }
    }

    /// Loads the company profile, if one has been saved.
    ///
    /// A profile written by an earlier generation with a free-text
    /// address is upgraded on read; the original text is preserved in
    /// `legacy_address`.
    pub async fn get(&self) -> StoreResult<Option<Company>> {
        let Some(json) = self.store.get_raw(keys::COMPANY).await? else {
            return Ok(None);
        };

        let company = upgrade::upgrade_company(&json).map_err(|source| {
            StoreError::CorruptDocument {
                key: keys::COMPANY.to_string(),
                source,
            }
        })?;

        Ok(Some(company))
    }

    /// Saves the company profile, replacing any previous one.
    ///
    /// A profile saved with structured address fields drops the preserved
    /// legacy text; the structured form is now authoritative.
    pub async fn save(&self, mut company: Company) -> StoreResult<()> {
        if !company.address.is_empty() {
            company.legacy_address = None;
        }

        let json = serde_json::to_string(&company).map_err(StoreError::Encode)?;
        self.store.put_raw(keys::COMPANY, &json).await?;

        debug!(name = %company.name, "Company profile saved");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;
    use quill_core::Address;

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        assert!(store.company().get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.company();

        let company = Company {
            name: "Acme Corp".to_string(),
            email: "hello@acme.test".to_string(),
            address: Address {
                street: "123 Main St".to_string(),
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                zip_code: "62704".to_string(),
            },
            ..Default::default()
        };
        repo.save(company).await.unwrap();

        let loaded = repo.get().await.unwrap().unwrap();
        assert_eq!(loaded.name, "Acme Corp");
        assert_eq!(loaded.address.city, "Springfield");
    }

    #[tokio::test]
    async fn test_legacy_free_text_address_survives_until_resave() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        store
            .put_raw(
                keys::COMPANY,
                r#"{"name":"Acme","address":"123 Main St\nSpringfield, IL 62704"}"#,
            )
            .await
            .unwrap();

        let repo = store.company();
        let loaded = repo.get().await.unwrap().unwrap();
        assert_eq!(loaded.address.street, "123 Main St");
        assert!(loaded.legacy_address.is_some());

        // Re-saving with structured fields drops the preserved text
        let mut updated = loaded;
        updated.address.city = "Springfield".to_string();
        updated.address.state = "IL".to_string();
        updated.address.zip_code = "62704".to_string();
        repo.save(updated).await.unwrap();

        let reloaded = repo.get().await.unwrap().unwrap();
        assert_eq!(reloaded.legacy_address, None);
    }
}
