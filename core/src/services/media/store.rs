//! Upload types and the storage seam

use std::fmt;

use async_trait::async_trait;

use crate::errors::DomainError;

/// What an uploaded file is for; doubles as its multipart field name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaPurpose {
    CarImage,
    PaymentReceipt,
    DriverLicense,
}

impl MediaPurpose {
    /// Multipart field name, also used as the stored filename tag
    pub fn field_name(&self) -> &'static str {
        match self {
            MediaPurpose::CarImage => "carImage",
            MediaPurpose::PaymentReceipt => "proofOfPayment",
            MediaPurpose::DriverLicense => "driverLicense",
        }
    }
}

impl fmt::Display for MediaPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// File received from a client
#[derive(Clone, PartialEq, Eq)]
pub struct Upload {
    /// Client-supplied file name, if any
    pub file_name: Option<String>,
    /// Declared MIME type
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(
        file_name: Option<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name,
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Declared type is `image/*`; contents are not inspected
    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }

    /// File extension derived from the MIME subtype, then the file name
    pub fn extension(&self) -> String {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        let from_mime = match essence.as_str() {
            "image/jpeg" | "image/pjpeg" => Some("jpg".to_string()),
            "image/svg+xml" => Some("svg".to_string()),
            other => other
                .split_once('/')
                .map(|(_, subtype)| subtype.to_string())
                .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())),
        };

        from_mime
            .or_else(|| {
                self.file_name
                    .as_deref()
                    .and_then(|name| name.rsplit_once('.'))
                    .map(|(_, ext)| ext.to_ascii_lowercase())
                    .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            })
            .unwrap_or_else(|| "bin".to_string())
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Reference to a stored file, as persisted in the database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMedia {
    pub reference: String,
}

impl StoredMedia {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

/// Byte storage for uploaded files
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store the bytes under a fresh unique name
    async fn store(&self, purpose: MediaPurpose, upload: &Upload)
        -> Result<StoredMedia, DomainError>;

    /// Remove a previously stored file
    async fn remove(&self, media: &StoredMedia) -> Result<(), DomainError>;
}
