use serde::{Serialize, de::DeserializeOwned};

use crate::error::StorageError;
use crate::objects::ObjectStore;

/// Load a JSON record.
pub async fn load_record<T: DeserializeOwned>(
    store: &ObjectStore,
    key: &str,
) -> Result<T, StorageError> {
    let body = store.get_object(key).await?;
    Ok(serde_json::from_slice(&body)?)
}

/// Load a JSON record, mapping a missing key to `None`.
pub async fn try_load_record<T: DeserializeOwned>(
    store: &ObjectStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match load_record(store, key).await {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Save a JSON record, replacing whatever was stored under `key`.
pub async fn save_record<T: Serialize>(
    store: &ObjectStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    store.put_object(key, body).await?;
    tracing::debug!(key, "record_saved");
    Ok(())
}

/// Load every record under `prefix`, in key order.
///
/// Objects that fail to deserialize are skipped with a warning rather
/// than failing the whole listing.
pub async fn load_records<T: DeserializeOwned>(
    store: &ObjectStore,
    prefix: &str,
) -> Result<Vec<T>, StorageError> {
    let keys = store.list_objects(prefix).await?;

    let mut records = Vec::with_capacity(keys.len());
    for key in &keys {
        let body = match store.get_object(key).await {
            Ok(body) => body,
            // Deleted between list and get.
            Err(StorageError::NotFound { .. }) => continue,
            Err(e) => return Err(e),
        };
        match serde_json::from_slice(&body) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!(key = %key, error = %e, "skipping unreadable record"),
        }
    }
    Ok(records)
}
