use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use bucket_index_lambda::adapters::index_store::IndexStore;
use bucket_index_lambda::config::RelayConfig;
use bucket_index_lambda::handlers::dispatcher::handle_notification_event;
use bucket_index_lambda::handlers::recorder::Recorder;
use bucket_index_lambda::runtime::contract::{IndexItem, InvocationResponse};
use bucket_index_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::Instrument;

struct DynamoDbIndexStore {
    config: RelayConfig,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl IndexStore for DynamoDbIndexStore {
    async fn put_item(&self, item: &IndexItem) -> Result<(), String> {
        let table_name = self
            .config
            .table_name()
            .map_err(|error| error.to_string())?;

        self.dynamodb_client
            .put_item()
            .table_name(table_name)
            .item("Key", AttributeValue::S(item.key.clone()))
            .item("Timestamp", AttributeValue::S(item.timestamp.clone()))
            .send()
            .await
            .map(|_| ())
            .map_err(|error| describe_sdk_error(&error))
    }
}

/// Prefers the service's own code and message (e.g. throttling) over the
/// generic SDK wrapper text; transport failures keep their full source chain.
fn describe_sdk_error<E, R>(error: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let Some(service_error) = error.as_service_error() else {
        return DisplayErrorContext(error).to_string();
    };

    match (service_error.code(), service_error.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => DisplayErrorContext(error).to_string(),
    }
}

async fn handle_request(
    recorder: &Recorder<DynamoDbIndexStore>,
    event: LambdaEvent<Value>,
) -> Result<InvocationResponse, Error> {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);
    Ok(handle_notification_event(event.payload, recorder)
        .instrument(span)
        .await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing(true);

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let recorder = Recorder::new(DynamoDbIndexStore {
        config: RelayConfig::from_env(),
        dynamodb_client: aws_sdk_dynamodb::Client::new(&aws_config),
    });
    let recorder = &recorder;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_request(recorder, event).await
    }))
    .await
}
