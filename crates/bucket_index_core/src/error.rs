use thiserror::Error;

/// A notification record that cannot be turned into an index item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MalformedRecordError {
    message: String,
}

impl MalformedRecordError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A single durable-table write that did not go through.
///
/// Displays as the underlying cause only, so the invocation failure body reads
/// `Error processing object: <cause>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StorageWriteError {
    key: Option<String>,
    message: String,
}

impl StorageWriteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            key: None,
            message: message.into(),
        }
    }

    pub fn for_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            message: message.into(),
        }
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error(transparent)]
    MalformedRecord(#[from] MalformedRecordError),
    #[error(transparent)]
    StorageWrite(#[from] StorageWriteError),
}

impl RelayError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MalformedRecord(_) => "malformed_record",
            Self::StorageWrite(_) => "storage_write",
        }
    }
}
