//! Object storage for transfer-proof images.
//!
//! Uploading is two steps behind [`ObjectStorage`]: `upload` stores the
//! bytes and returns the object path, `public_url` resolves that path to
//! the URL saved on the registration row. Callers treat both as a single
//! "upload proof" step.

pub mod http;
pub mod local;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use http::HttpObjectStorage;
pub use local::LocalObjectStorage;
pub use memory::MemoryObjectStorage;

/// Folder inside the bucket where proofs are stored.
pub const PROOF_PREFIX: &str = "bukti-transfer";

/// Object storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An object already exists at the path (uploads never overwrite).
    #[error("object already exists: {0}")]
    AlreadyExists(String),

    /// The object path is not acceptable to the backend.
    #[error("invalid object path: {0}")]
    InvalidPath(String),

    /// Remote storage answered with a non-success status.
    #[error("storage returned {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// Transport failure talking to remote storage.
    #[error("storage request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Local filesystem failure.
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A file received from the registration form.
#[derive(Clone, PartialEq, Eq)]
pub struct ProofUpload {
    /// Client-side file name, used only for its extension.
    pub file_name: Option<String>,
    /// Declared MIME type.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ProofUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProofUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ProofUpload {
    /// Returns `true` when the form field carried no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Backend that stores proof images and serves them publicly.
#[async_trait]
pub trait ObjectStorage: Send + Sync + fmt::Debug {
    /// Stores `bytes` at `path` and returns the stored path.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend refuses or fails the write.
    async fn upload(
        &self,
        path: &str,
        bytes: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<String, StorageError>;

    /// Resolves a stored path to its public URL.
    fn public_url(&self, path: &str) -> String;
}

/// Builds `bukti-transfer/{user_id}-{unix_millis}.{ext}` for a proof.
///
/// The extension is the text after the last `.` of the client file name,
/// lowercased and restricted to ASCII alphanumerics; `bin` when absent.
#[must_use]
pub fn proof_object_path(user_id: Uuid, at: DateTime<Utc>, file_name: Option<&str>) -> String {
    let ext = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    format!("{PROOF_PREFIX}/{user_id}-{}.{ext}", at.timestamp_millis())
}

/// Rejects empty, absolute, and parent-traversing object paths.
pub(crate) fn validate_object_path(path: &str) -> Result<(), StorageError> {
    if path.is_empty()
        || path.starts_with('/')
        || path.split('/').any(|seg| seg == ".." || seg.is_empty())
    {
        return Err(StorageError::InvalidPath(path.to_string()));
    }
    Ok(())
}
