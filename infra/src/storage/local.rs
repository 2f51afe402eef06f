//! Local-disk media store
//!
//! Files land in the configured upload directory as
//! `<field tag>-<unix millis>-<8 hex>.<ext>` and are referenced by
//! `<public prefix>/<file name>`, the path the API serves them under.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use rr_core::errors::{DomainError, MediaError};
use rr_core::services::media::{MediaPurpose, MediaStore, StoredMedia, Upload};
use rr_shared::config::MediaConfig;

use crate::InfrastructureError;

/// Media store writing to a local directory
#[derive(Debug, Clone)]
pub struct LocalMediaStore {
    upload_dir: PathBuf,
    public_prefix: String,
}

impl LocalMediaStore {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            public_prefix: config.public_prefix.clone(),
        }
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<(), InfrastructureError> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        Ok(())
    }

    fn file_name(purpose: MediaPurpose, upload: &Upload) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}.{}",
            purpose.field_name(),
            Utc::now().timestamp_millis(),
            &suffix[..8],
            upload.extension()
        )
    }

    /// Map a stored reference back to its file, refusing anything outside the directory
    fn path_for(&self, reference: &str) -> Option<PathBuf> {
        let name = reference
            .strip_prefix(self.public_prefix.as_str())?
            .strip_prefix('/')?;

        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return None;
        }

        Some(self.upload_dir.join(name))
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(
        &self,
        purpose: MediaPurpose,
        upload: &Upload,
    ) -> Result<StoredMedia, DomainError> {
        let storage_failed = |e: std::io::Error| {
            tracing::error!(error = %e, dir = %self.upload_dir.display(), "Failed to write upload");
            DomainError::from(MediaError::StorageFailed {
                message: e.to_string(),
            })
        };

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(storage_failed)?;

        let file_name = Self::file_name(purpose, upload);
        tokio::fs::write(self.upload_dir.join(&file_name), &upload.bytes)
            .await
            .map_err(storage_failed)?;

        tracing::debug!(
            file_name = %file_name,
            bytes = upload.bytes.len(),
            "Upload written to disk"
        );

        Ok(StoredMedia::new(format!("{}/{}", self.public_prefix, file_name)))
    }

    async fn remove(&self, media: &StoredMedia) -> Result<(), DomainError> {
        let path = self.path_for(&media.reference).ok_or_else(|| {
            DomainError::from(MediaError::StorageFailed {
                message: format!("Reference outside upload directory: {}", media.reference),
            })
        })?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::StorageFailed {
                message: e.to_string(),
            }
            .into()),
        }
    }
}
