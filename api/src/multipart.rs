//! Multipart form collection
//!
//! Collects the text fields of a `multipart/form-data` body and at most one
//! file part into a [`MultipartForm`]. Empty file parts, which browsers send
//! when no file was chosen, count as absent.

use std::collections::HashMap;
use std::str::FromStr;

use actix_multipart::{Field, Multipart};
use futures_util::TryStreamExt;
use rr_core::errors::DomainError;
use rr_core::services::media::Upload;

/// Text fields and the uploaded file of one multipart request
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    file: Option<(String, Upload)>,
}

impl MultipartForm {
    /// Drain a multipart payload
    pub async fn collect(mut payload: Multipart) -> Result<Self, DomainError> {
        let mut form = Self::default();

        while let Some(field) = payload.try_next().await.map_err(malformed)? {
            let name = match field.content_disposition().get_name() {
                Some(name) => name.to_string(),
                None => continue,
            };
            let file_name = field
                .content_disposition()
                .get_filename()
                .map(|f| f.to_string());
            let content_type = field.content_type().map(|m| m.to_string());

            let bytes = read_field(field).await?;

            match file_name {
                Some(file_name) => {
                    if bytes.is_empty() && file_name.is_empty() {
                        continue;
                    }
                    if form.file.is_some() {
                        return Err(DomainError::validation("Only one file may be uploaded"));
                    }
                    let upload = Upload::new(
                        Some(file_name).filter(|f| !f.is_empty()),
                        content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
                        bytes,
                    );
                    tracing::debug!(field = %name, upload = ?upload, "Received file part");
                    form.file = Some((name, upload));
                }
                None => {
                    let value = String::from_utf8(bytes).map_err(|_| {
                        DomainError::validation(format!("Field {} is not valid UTF-8", name))
                    })?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }

    /// Text value of a field, trimmed; blank counts as absent
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn required_text(&self, name: &str) -> Result<&str, DomainError> {
        self.text(name)
            .ok_or_else(|| DomainError::validation(format!("{} is required", name)))
    }

    /// Parse a required field
    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, DomainError> {
        self.required_text(name)?
            .parse()
            .map_err(|_| DomainError::validation(format!("{} is invalid", name)))
    }

    pub fn parse_optional<T: FromStr>(&self, name: &str) -> Result<Option<T>, DomainError> {
        self.text(name)
            .map(|v| {
                v.parse()
                    .map_err(|_| DomainError::validation(format!("{} is invalid", name)))
            })
            .transpose()
    }

    /// Take the uploaded file if it was sent under `name`
    pub fn take_file(&mut self, name: &str) -> Option<Upload> {
        match self.file.take() {
            Some((field, upload)) if field == name => Some(upload),
            other => {
                self.file = other;
                None
            }
        }
    }
}

async fn read_field(mut field: Field) -> Result<Vec<u8>, DomainError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn malformed(e: actix_multipart::MultipartError) -> DomainError {
    DomainError::validation(format!("Malformed multipart body: {}", e))
}
