//! # Client Repository
//!
//! Client book operations over the `clients` document.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::repository::keys;
use crate::store::Store;
use quill_core::{Address, Client};

/// Repository for client book operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    store: Store,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(store: Store) -> Self {
        ClientRepository { store }
    }

    /// Lists all saved clients.
    pub async fn list(&self) -> StoreResult<Vec<Client>> {
        let Some(json) = self.store.get_raw(keys::CLIENTS).await? else {
            return Ok(Vec::new());
        };

        let clients: Vec<Client> =
            serde_json::from_str(&json).map_err(|source| StoreError::CorruptDocument {
                key: keys::CLIENTS.to_string(),
                source,
            })?;

        debug!(count = clients.len(), "Loaded clients");
        Ok(clients)
    }

    /// Gets a client by its ID.
    pub async fn get(&self, id: &str) -> StoreResult<Option<Client>> {
        let clients = self.list().await?;
        Ok(clients.into_iter().find(|c| c.id == id))
    }

    /// Adds a new client and returns its generated ID.
    ///
    /// The address is stored as structured fields so it can be validated
    /// and reformatted; callers validate before saving.
    pub async fn add(&self, name: &str, email: &str, address: &Address) -> StoreResult<String> {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            street_address: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            pin_code: address.zip_code.clone(),
            created_at: Utc::now(),
        };
        let id = client.id.clone();

        let mut clients = self.list().await?;
        clients.push(client);
        self.replace_all(&clients).await?;

        debug!(id = %id, "Client added");
        Ok(id)
    }

    /// Removes a client by ID.
    ///
    /// ## Errors
    /// * `NotFound` - No client with the given ID exists
    pub async fn remove(&self, id: &str) -> StoreResult<()> {
        let mut clients = self.list().await?;
        let before = clients.len();
        clients.retain(|c| c.id != id);

        if clients.len() == before {
            return Err(StoreError::not_found("Client", id));
        }

        self.replace_all(&clients).await?;
        debug!(id = %id, "Client removed");
        Ok(())
    }

    /// Rewrites the whole collection.
    async fn replace_all(&self, clients: &[Client]) -> StoreResult<()> {
        let json = serde_json::to_string(clients).map_err(StoreError::Encode)?;
        self.store.put_raw(keys::CLIENTS, &json).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    fn springfield() -> Address {
        Address {
            street: "123 Main St".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62704".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_list_remove() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.clients();

        let id = repo
            .add("Acme Corp", "billing@acme.test", &springfield())
            .await
            .unwrap();

        let clients = repo.list().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].city, "Springfield");
        assert_eq!(clients[0].address().format(), "123 Main St\nSpringfield, IL 62704");

        repo.remove(&id).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let err = store.clients().remove("ghost").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
