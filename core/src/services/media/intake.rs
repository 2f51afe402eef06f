//! Upload validation in front of the media store

use std::sync::Arc;

use crate::errors::{DomainError, MediaError};

use super::store::{MediaPurpose, MediaStore, StoredMedia, Upload};

/// Accepts image uploads and stores them
pub struct MediaIntake<M: MediaStore> {
    store: Arc<M>,
}

impl<M: MediaStore> MediaIntake<M> {
    pub fn new(store: Arc<M>) -> Self {
        Self { store }
    }

    /// Validate and store a required file
    ///
    /// # Returns
    ///
    /// * `Ok(StoredMedia)` - Reference to the stored file
    /// * `Err(MediaError::MissingFile)` - No file was supplied
    /// * `Err(MediaError::UnsupportedContentType)` - Declared type is not `image/*`
    pub async fn accept(
        &self,
        purpose: MediaPurpose,
        upload: Option<Upload>,
    ) -> Result<StoredMedia, DomainError> {
        let upload = upload.ok_or_else(|| MediaError::MissingFile {
            field: purpose.field_name().to_string(),
        })?;
        self.store_image(purpose, &upload).await
    }

    /// Same as [`accept`](Self::accept), but absence is not an error
    pub async fn accept_optional(
        &self,
        purpose: MediaPurpose,
        upload: Option<Upload>,
    ) -> Result<Option<StoredMedia>, DomainError> {
        match upload {
            Some(upload) => self.store_image(purpose, &upload).await.map(Some),
            None => Ok(None),
        }
    }

    /// Best-effort removal after a failed operation
    pub async fn discard(&self, media: &StoredMedia) {
        if let Err(e) = self.store.remove(media).await {
            tracing::warn!(
                reference = %media.reference,
                error = %e,
                "Failed to remove orphaned upload"
            );
        }
    }

    async fn store_image(
        &self,
        purpose: MediaPurpose,
        upload: &Upload,
    ) -> Result<StoredMedia, DomainError> {
        if !upload.is_image() {
            tracing::warn!(
                purpose = %purpose,
                content_type = %upload.content_type,
                "Rejected non-image upload"
            );
            return Err(MediaError::UnsupportedContentType {
                content_type: upload.content_type.clone(),
            }
            .into());
        }

        let stored = self.store.store(purpose, upload).await?;
        tracing::debug!(purpose = %purpose, reference = %stored.reference, "Stored upload");
        Ok(stored)
    }
}
