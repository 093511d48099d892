use example_service::config::ExampleConfig;
use example_service::services::init_metrics;
use example_service::startup::Application;
use service_core::config::load_dotenv;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = load_dotenv();
    let config = ExampleConfig::load()?;

    init_tracing(
        "example-service",
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );
    if let Err(e) = dotenv {
        tracing::warn!(error = %e, "Error loading .env file, using environment variables");
    }

    init_metrics()?;

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start example-service: {:#}", e);
        e
    })?;
    application.run_until_stopped().await?;

    Ok(())
}
