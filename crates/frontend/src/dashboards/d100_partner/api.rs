//! Хранилище документов: по одному документу на владельца и коллекцию.

use contracts::domain::common::CollectionName;
use gloo_net::http::Request;

use super::state::CollectionItems;
use crate::shared::api_utils::api_base;
use crate::system::auth::{api::error_message, storage};

#[allow(async_fn_in_trait)]
pub trait PersistenceAdapter {
    /// Все записи коллекции; несколько сохранённых документов склеиваются по порядку
    async fn load_all(
        &self,
        owner_id: &str,
        collection: CollectionName,
    ) -> Result<CollectionItems, String>;

    /// Полная перезапись документа коллекции
    async fn save_all(&self, owner_id: &str, items: &CollectionItems) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpDocumentStore;

fn collection_url(owner_id: &str, collection: CollectionName) -> String {
    format!(
        "{}/api/users/{}/collections/{}",
        api_base(),
        urlencoding::encode(owner_id),
        collection.key()
    )
}

fn bearer() -> Result<String, String> {
    storage::get_access_token()
        .map(|token| format!("Bearer {}", token))
        .ok_or_else(|| "Сессия истекла".to_string())
}

impl PersistenceAdapter for HttpDocumentStore {
    async fn load_all(
        &self,
        owner_id: &str,
        collection: CollectionName,
    ) -> Result<CollectionItems, String> {
        let response = Request::get(&collection_url(owner_id, collection))
            .header("Authorization", &bearer()?)
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }

        let document: serde_json::Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))?;

        CollectionItems::from_document(collection, document)
            .map_err(|e| format!("Failed to parse {}: {}", collection, e))
    }

    async fn save_all(&self, owner_id: &str, items: &CollectionItems) -> Result<(), String> {
        let document = items
            .to_document()
            .map_err(|e| format!("Failed to serialize request: {}", e))?;

        let response = Request::put(&collection_url(owner_id, items.name()))
            .header("Authorization", &bearer()?)
            .json(&document)
            .map_err(|e| format!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.ok() {
            return Err(error_message(response).await);
        }

        Ok(())
    }
}
