use axum::{
    extract::{Json, Path},
    http::StatusCode,
};
use contracts::domain::common::{CollectionDocument, CollectionName};
use serde_json::Value;

use crate::shared::data::document_store;
use crate::shared::error::{ApiError, ApiResult};
use crate::system::auth::extractor::CurrentUser;

fn collection_from_path(key: &str) -> ApiResult<CollectionName> {
    CollectionName::from_key(key)
        .ok_or_else(|| ApiError::NotFound(format!("Неизвестная коллекция: {}", key)))
}

/// GET /api/users/:owner/collections/:collection
pub async fn load(
    user: CurrentUser,
    Path((owner_id, collection)): Path<(String, String)>,
) -> ApiResult<Json<CollectionDocument<Value>>> {
    user.ensure_owner(&owner_id)?;
    let collection = collection_from_path(&collection)?;

    let items = document_store::load_items(&owner_id, collection).await?;
    tracing::debug!("Loaded {} items of {} for {}", items.len(), collection, owner_id);

    Ok(Json(CollectionDocument::new(items)))
}

/// PUT /api/users/:owner/collections/:collection
pub async fn save(
    user: CurrentUser,
    Path((owner_id, collection)): Path<(String, String)>,
    Json(document): Json<CollectionDocument<Value>>,
) -> ApiResult<StatusCode> {
    user.ensure_owner(&owner_id)?;
    let collection = collection_from_path(&collection)?;

    document_store::save_items(&owner_id, collection, document.items).await?;

    Ok(StatusCode::NO_CONTENT)
}
