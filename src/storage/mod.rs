pub mod s3;

use s3::S3Store;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Whole-object blob storage used by the high-score list.
#[derive(Debug, Clone)]
pub enum ObjectStore {
    S3(S3Store),
    Memory(MemoryStore),
}

impl ObjectStore {
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    pub async fn put(&self, key: &str, body: Vec<u8>) -> anyhow::Result<()> {
        match self {
            Self::S3(store) => store.put_object(key, body).await,
            Self::Memory(store) => {
                store.put(key, body).await;
                Ok(())
            }
        }
    }

    /// `Ok(None)` means the object does not exist; any other failure is an error.
    pub async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        match self {
            Self::S3(store) => store.get_object(key).await,
            Self::Memory(store) => Ok(store.get(key).await),
        }
    }

    pub fn backend(&self) -> &'static str {
        match self {
            Self::S3(_) => "s3",
            Self::Memory(_) => "memory",
        }
    }
}

/// Process-local stand-in used when no bucket is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub async fn put(&self, key: &str, body: Vec<u8>) {
        self.objects.lock().await.insert(key.to_string(), body);
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().await.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_overwrites_whole_objects() {
        let store = ObjectStore::memory();
        store.put("scores.json", b"[1]".to_vec()).await.unwrap();
        store.put("scores.json", b"[1,2]".to_vec()).await.unwrap();
        assert_eq!(store.get("scores.json").await.unwrap(), Some(b"[1,2]".to_vec()));
    }

    #[tokio::test]
    async fn missing_object_is_not_an_error() {
        let store = ObjectStore::memory();
        assert_eq!(store.get("scores.json").await.unwrap(), None);
        assert_eq!(store.backend(), "memory");
    }

    #[tokio::test]
    async fn clones_share_contents() {
        let store = ObjectStore::memory();
        let other = store.clone();
        other.put("k", b"v".to_vec()).await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
    }
}
