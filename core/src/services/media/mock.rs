//! In-memory media store for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::{DomainError, MediaError};

use super::store::{MediaPurpose, MediaStore, StoredMedia, Upload};

/// Mock media store keeping files in a map
#[derive(Clone, Default)]
pub struct MockMediaStore {
    files: Arc<RwLock<HashMap<String, Upload>>>,
    counter: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent store call fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn contains(&self, reference: &str) -> bool {
        self.files.read().await.contains_key(reference)
    }

    pub async fn stored_count(&self) -> usize {
        self.files.read().await.len()
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn store(
        &self,
        purpose: MediaPurpose,
        upload: &Upload,
    ) -> Result<StoredMedia, DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MediaError::StorageFailed {
                message: "mock media store unavailable".to_string(),
            }
            .into());
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let reference = format!(
            "/uploads/{}-{}.{}",
            purpose.field_name(),
            n,
            upload.extension()
        );
        self.files
            .write()
            .await
            .insert(reference.clone(), upload.clone());
        Ok(StoredMedia::new(reference))
    }

    async fn remove(&self, media: &StoredMedia) -> Result<(), DomainError> {
        self.files.write().await.remove(&media.reference);
        Ok(())
    }
}
