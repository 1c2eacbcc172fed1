use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::MalformedRecordError;

pub const PROCESSED_PREFIX: &str = "Processed: ";
pub const FAILURE_PREFIX: &str = "Error processing object: ";

/// Envelope delivered by the hosting runtime. Records stay raw until their turn
/// in the batch so that one malformed record cannot reject its predecessors.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NotificationEvent {
    #[serde(rename = "Records")]
    pub records: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NotificationRecord {
    #[serde(rename = "eventTime")]
    pub event_time: Option<Value>,
    #[serde(rename = "eventName")]
    pub event_name: Option<String>,
    pub s3: Option<S3Entity>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct S3Entity {
    pub bucket: Option<S3Bucket>,
    pub object: Option<S3Object>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct S3Bucket {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct S3Object {
    pub key: Option<String>,
}

impl NotificationRecord {
    pub fn object_key(&self) -> Option<&str> {
        self.s3
            .as_ref()
            .and_then(|entity| entity.object.as_ref())
            .and_then(|object| object.key.as_deref())
    }

    pub fn bucket_name(&self) -> Option<&str> {
        self.s3
            .as_ref()
            .and_then(|entity| entity.bucket.as_ref())
            .and_then(|bucket| bucket.name.as_deref())
    }
}

/// Row persisted to the durable table, keyed by `Key`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexItem {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub last_key: Option<String>,
}

impl BatchSummary {
    pub fn message(&self) -> String {
        match &self.last_key {
            Some(key) => format!("{PROCESSED_PREFIX}{key}"),
            None => format!("{PROCESSED_PREFIX}{} records", self.processed),
        }
    }
}

pub fn decode_event(event: Value) -> Result<NotificationEvent, MalformedRecordError> {
    serde_json::from_value(event)
        .map_err(|error| MalformedRecordError::new(format!("invalid notification event: {error}")))
}

pub fn decode_record(record: Value) -> Result<NotificationRecord, MalformedRecordError> {
    serde_json::from_value(record)
        .map_err(|error| MalformedRecordError::new(format!("invalid notification record: {error}")))
}
