//! Upload storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where uploaded car images, receipts and licences are written and served from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Directory the files are written to
    pub upload_dir: PathBuf,

    /// URL prefix the stored references start with
    pub public_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("./uploads"),
            public_prefix: String::from("/uploads"),
        }
    }
}

impl MediaConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);
        let public_prefix = std::env::var("UPLOAD_PUBLIC_PREFIX")
            .map(|p| normalize_prefix(&p))
            .unwrap_or(defaults.public_prefix);

        Self {
            upload_dir,
            public_prefix,
        }
    }

    pub fn new(upload_dir: impl Into<PathBuf>, public_prefix: &str) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            public_prefix: normalize_prefix(public_prefix),
        }
    }
}

/// Leading slash, no trailing slash
fn normalize_prefix(prefix: &str) -> String {
    format!("/{}", prefix.trim().trim_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(MediaConfig::new("/tmp/x", "uploads/").public_prefix, "/uploads");
        assert_eq!(MediaConfig::new("/tmp/x", "/static/files").public_prefix, "/static/files");
    }
}
