use aws_config::BehaviorVersion;
use aws_lambda_events::event::sns::SnsEvent;
use lambda_runtime::{run, service_fn, Error as LambdaError, LambdaEvent};
use tracing::{error, info};

use inspector_delivery::config::ExporterConfig;
use inspector_delivery::export::export_run;
use inspector_delivery::inspector::InspectorClient;
use inspector_delivery::notification;
use inspector_delivery::report::HttpReportSource;
use inspector_delivery::storage::S3ObjectStore;

async fn handle_event(
    event: LambdaEvent<SnsEvent>,
    config: &ExporterConfig,
    inspector: &InspectorClient,
    store: &S3ObjectStore,
    reports: &HttpReportSource,
) -> inspector_delivery::Result<()> {
    for run_arn in notification::run_arns(&event.payload)? {
        let summary = export_run(&run_arn, inspector, store, reports, config).await?;
        info!(
            "exported {} findings and {} for run {}",
            summary.findings_exported, summary.report_key, summary.run_name
        );
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

    let config = ExporterConfig::from_env()?;
    let aws_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let inspector = InspectorClient::new(&aws_config);
    let store = S3ObjectStore::new(aws_sdk_s3::Client::new(&aws_config), config.bucket.clone());
    let reports = HttpReportSource::new();

    run(service_fn(|event: LambdaEvent<SnsEvent>| async {
        handle_event(event, &config, &inspector, &store, &reports)
            .await
            .map_err(|err| {
                error!("findings export failed: {err}");
                LambdaError::from(err)
            })
    }))
    .await
}
