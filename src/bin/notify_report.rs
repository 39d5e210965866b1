use aws_config::BehaviorVersion;
use aws_lambda_events::event::sns::SnsEvent;
use lambda_runtime::{run, service_fn, Error as LambdaError, LambdaEvent};
use tracing::error;

use inspector_delivery::config::NotifierConfig;
use inspector_delivery::inspector::InspectorClient;
use inspector_delivery::notification;
use inspector_delivery::notify::deliver_report_link;
use inspector_delivery::publish::SnsTopicPublisher;

async fn handle_event(
    event: LambdaEvent<SnsEvent>,
    config: &NotifierConfig,
    inspector: &InspectorClient,
    topic: &SnsTopicPublisher,
) -> inspector_delivery::Result<()> {
    for run_arn in notification::run_arns(&event.payload)? {
        deliver_report_link(&run_arn, inspector, topic, config).await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .without_time() // CloudWatch will add the ingestion time
        .with_target(false)
        .init();

    let config = NotifierConfig::from_env()?;
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let inspector = InspectorClient::new(&aws_config);
    let topic = SnsTopicPublisher::new(
        aws_sdk_sns::Client::new(&aws_config),
        config.topic_arn.clone(),
    );

    run(service_fn(|event: LambdaEvent<SnsEvent>| async {
        handle_event(event, &config, &inspector, &topic)
            .await
            .map_err(|err| {
                error!("report delivery failed: {err}");
                LambdaError::from(err)
            })
    }))
    .await
}
