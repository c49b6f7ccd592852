//! Документы пользователя: `(owner, collection, doc_key) -> { "items": [...] }`.
//!
//! Чтение склеивает `items` всех документов коллекции в порядке ключа,
//! запись полностью перезаписывает документ с ключом `data`.

use anyhow::{Context, Result};
use chrono::Utc;
use contracts::domain::common::{CollectionName, COLLECTION_DOCUMENT_KEY};
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use serde_json::Value;

use super::db::get_connection;

/// Склеить элементы нескольких документов; документ без массива `items` пропускается
pub fn merge_documents(bodies: &[Value]) -> Vec<Value> {
    bodies
        .iter()
        .filter_map(|body| body.get("items").and_then(Value::as_array))
        .flat_map(|items| items.iter().cloned())
        .collect()
}

pub async fn load_items(owner_id: &str, collection: CollectionName) -> Result<Vec<Value>> {
    let conn = get_connection();

    let rows = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT doc_key, body FROM user_documents
             WHERE owner_id = ? AND collection = ?
             ORDER BY doc_key",
            [owner_id.into(), collection.key().into()],
        ))
        .await?;

    let mut bodies = Vec::with_capacity(rows.len());
    for row in rows {
        let doc_key: String = row.try_get("", "doc_key")?;
        let body: String = row.try_get("", "body")?;
        match serde_json::from_str::<Value>(&body) {
            Ok(value) => bodies.push(value),
            Err(e) => tracing::warn!(
                "Skipping unreadable document {}/{}/{}: {}",
                owner_id,
                collection,
                doc_key,
                e
            ),
        }
    }

    Ok(merge_documents(&bodies))
}

pub async fn save_items(owner_id: &str, collection: CollectionName, items: Vec<Value>) -> Result<()> {
    let body = serde_json::json!({ "items": items }).to_string();
    let now = Utc::now().to_rfc3339();

    let conn = get_connection();
    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO user_documents (owner_id, collection, doc_key, body, updated_at)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT(owner_id, collection, doc_key)
         DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
        [
            owner_id.into(),
            collection.key().into(),
            COLLECTION_DOCUMENT_KEY.into(),
            body.into(),
            now.into(),
        ],
    ))
    .await
    .context("Failed to save document")?;

    Ok(())
}
