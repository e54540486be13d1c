//! Content sources for outbound messages.
//!
//! Media payloads come from an external read-only store ("one random
//! payload of kind K"); locations and filler phrases are generated
//! locally.

pub mod location;
pub mod phrases;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rand::Rng;

use crate::api::MessageKind;
use crate::error::ContentError;

/// Read-only lookup of stored media payloads.
///
/// `Ok(None)` means no payload is available for the kind; the caller
/// treats that as a failed send for the affected step only.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// One random payload of the given kind.
    async fn random_payload(&self, kind: MessageKind) -> Result<Option<String>, ContentError>;
}

/// Content source backed by a directory of JSON files.
///
/// Each media kind maps to `<dir>/<kind>.json`, a JSON array of base64
/// strings.
pub struct FileContentSource {
    dir: PathBuf,
}

impl FileContentSource {
    /// Create a source over the given directory.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    async fn random_payload(&self, kind: MessageKind) -> Result<Option<String>, ContentError> {
        let path = self.dir.join(format!("{}.json", kind.key()));

        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ContentError::Io { path, source }),
        };

        let payloads: Vec<String> =
            serde_json::from_slice(&raw).map_err(|source| ContentError::Malformed {
                path: path.clone(),
                source,
            })?;

        if payloads.is_empty() {
            return Ok(None);
        }

        let index = rand::thread_rng().gen_range(0..payloads.len());
        Ok(payloads.into_iter().nth(index))
    }
}
