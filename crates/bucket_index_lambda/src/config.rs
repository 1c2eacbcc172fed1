use crate::runtime::error::StorageWriteError;

pub const TABLE_NAME_ENV: &str = "TABLE_NAME";

/// Environment-derived settings for the relay.
///
/// Nothing is validated at load time: a missing table name only surfaces as a
/// `StorageWriteError` when a write is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayConfig {
    pub table_name: Option<String>,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            table_name: lookup(TABLE_NAME_ENV),
        }
    }

    pub fn table_name(&self) -> Result<&str, StorageWriteError> {
        match self.table_name.as_deref() {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(StorageWriteError::new(format!(
                "{TABLE_NAME_ENV} must be configured"
            ))),
        }
    }
}
