use serde_json::Value;

use crate::adapters::index_store::IndexStore;
use crate::handlers::recorder::Recorder;
use crate::runtime::contract::{
    decode_event, decode_record, BatchSummary, InvocationResponse, FAILURE_PREFIX,
};
use crate::runtime::error::RelayError;
use crate::runtime::transform::transform;

/// Outer invocation boundary: every outcome becomes a structured response.
pub async fn handle_notification_event<S: IndexStore>(
    event: Value,
    recorder: &Recorder<S>,
) -> InvocationResponse {
    let outcome = match decode_event(event) {
        Ok(event) => process_batch(event.records, recorder).await,
        Err(error) => Err(RelayError::from(error)),
    };

    match outcome {
        Ok(summary) => success_response(&summary.message()),
        Err(error) => failure_response(&error),
    }
}

/// Folds the batch in delivery order, one record at a time, stopping at the
/// first error. Writes issued before the failing record stay committed.
pub async fn process_batch<S: IndexStore>(
    records: Vec<Value>,
    recorder: &Recorder<S>,
) -> Result<BatchSummary, RelayError> {
    let total = records.len();
    tracing::info!(
        component = "dispatcher",
        event = "batch_started",
        records = total
    );

    let mut summary = BatchSummary::default();
    for (index, raw_record) in records.into_iter().enumerate() {
        summary = match process_record(raw_record, recorder, summary).await {
            Ok(next) => next,
            Err(error) => {
                tracing::error!(
                    component = "dispatcher",
                    event = "record_failed",
                    position = index + 1,
                    records = total,
                    kind = error.kind(),
                    error = %error,
                    "aborting batch"
                );
                return Err(error);
            }
        };
    }

    tracing::info!(
        component = "dispatcher",
        event = "batch_completed",
        processed = summary.processed
    );
    Ok(summary)
}

async fn process_record<S: IndexStore>(
    raw_record: Value,
    recorder: &Recorder<S>,
    summary: BatchSummary,
) -> Result<BatchSummary, RelayError> {
    let record = decode_record(raw_record)?;
    let item = transform(&record)?;
    tracing::debug!(
        component = "dispatcher",
        bucket = record.bucket_name().unwrap_or_default(),
        event_name = record.event_name.as_deref().unwrap_or_default(),
        key = %item.key,
        "transformed record"
    );

    recorder.record(&item).await?;
    Ok(BatchSummary {
        processed: summary.processed + 1,
        last_key: Some(item.key),
    })
}

fn success_response(message: &str) -> InvocationResponse {
    InvocationResponse {
        status_code: 200,
        body: json_string(message),
    }
}

fn failure_response(error: &RelayError) -> InvocationResponse {
    InvocationResponse {
        status_code: 500,
        body: json_string(&format!("{FAILURE_PREFIX}{error}")),
    }
}

fn json_string(message: &str) -> String {
    Value::String(message.to_string()).to_string()
}
