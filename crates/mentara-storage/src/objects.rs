use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::StorageError;

/// A keyed blob store.
///
/// Cloning is cheap; clones share the same underlying objects.
#[derive(Clone)]
pub struct ObjectStore {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Memory(Arc<RwLock<BTreeMap<String, Vec<u8>>>>),
    Directory(Arc<PathBuf>),
}

impl ObjectStore {
    /// A process-local store. Contents are lost when the process exits.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(RwLock::new(BTreeMap::new()))),
        }
    }

    /// A store rooted at `root`. Each key maps to a file below the root.
    pub async fn directory(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StorageError::Io {
                key: root.display().to_string(),
                source,
            })?;
        Ok(Self {
            backend: Backend::Directory(Arc::new(root)),
        })
    }

    /// Get an object's body.
    pub async fn get_object(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(objects) => {
                objects
                    .read()
                    .await
                    .get(key)
                    .cloned()
                    .ok_or_else(|| StorageError::NotFound {
                        key: key.to_string(),
                    })
            }
            Backend::Directory(root) => {
                tokio::fs::read(root.join(key)).await.map_err(|source| {
                    if source.kind() == std::io::ErrorKind::NotFound {
                        StorageError::NotFound {
                            key: key.to_string(),
                        }
                    } else {
                        StorageError::Io {
                            key: key.to_string(),
                            source,
                        }
                    }
                })
            }
        }
    }

    /// Put an object, replacing any previous body under the same key.
    pub async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(objects) => {
                objects.write().await.insert(key.to_string(), body);
                Ok(())
            }
            Backend::Directory(root) => {
                let path = root.join(key);
                let io_err = |source| StorageError::Io {
                    key: key.to_string(),
                    source,
                };
                if let Some(parent) = path.parent() {
                    tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
                }
                // Write-then-rename so readers never observe a partial file.
                let mut staging = path.clone().into_os_string();
                staging.push(".tmp");
                tokio::fs::write(&staging, &body).await.map_err(io_err)?;
                tokio::fs::rename(&staging, &path).await.map_err(io_err)?;
                Ok(())
            }
        }
    }

    /// Delete an object. Deleting a missing key is not an error.
    pub async fn delete_object(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match &self.backend {
            Backend::Memory(objects) => {
                objects.write().await.remove(key);
                Ok(())
            }
            Backend::Directory(root) => match tokio::fs::remove_file(root.join(key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(source) => Err(StorageError::Io {
                    key: key.to_string(),
                    source,
                }),
            },
        }
    }

    /// List keys starting with `prefix`, sorted.
    ///
    /// The directory backend only lists the directory named by the prefix
    /// up to its last `/`; the key layout is one level deep.
    pub async fn list_objects(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        match &self.backend {
            Backend::Memory(objects) => Ok(objects
                .read()
                .await
                .range(prefix.to_string()..)
                .take_while(|(key, _)| key.starts_with(prefix))
                .map(|(key, _)| key.clone())
                .collect()),
            Backend::Directory(root) => list_directory(root, prefix).await,
        }
    }
}

async fn list_directory(root: &Path, prefix: &str) -> Result<Vec<String>, StorageError> {
    let (dir, name_prefix) = match prefix.rsplit_once('/') {
        Some((dir, rest)) => (format!("{dir}/"), rest),
        None => (String::new(), prefix),
    };

    let mut entries = match tokio::fs::read_dir(root.join(&dir)).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StorageError::Io {
                key: prefix.to_string(),
                source,
            });
        }
    };

    let mut keys = Vec::new();
    loop {
        let entry = entries.next_entry().await.map_err(|source| StorageError::Io {
            key: prefix.to_string(),
            source,
        })?;
        let Some(entry) = entry else { break };

        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_file && name.starts_with(name_prefix) && !name.ends_with(".tmp") {
            keys.push(format!("{dir}{name}"));
        }
    }

    keys.sort();
    Ok(keys)
}

fn validate_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('/')
        || key.ends_with('/')
        || key.contains('\\')
        || key.split('/').any(|segment| segment.is_empty() || segment == "..");
    if invalid {
        return Err(StorageError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}
