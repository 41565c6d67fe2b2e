use crate::error::AppError;
use std::path::Path;
use std::sync::Arc;

/// The encoded bytes of one captured or picked photo.
///
/// Immutable once created; clones share the same buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    bytes: Arc<[u8]>,
}

impl Photo {
    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn open(path: &Path) -> Result<Self, AppError> {
        let bytes = std::fs::read(path).map_err(|e| AppError {
            message: format!("Failed to read photo {}: {}", path.display(), e),
        })?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
