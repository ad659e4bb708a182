use employee_service::config::EmployeeConfig;
use employee_service::services::init_metrics;
use employee_service::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize metrics recorder (must be before any metrics are recorded)
    init_metrics()?;

    let config = EmployeeConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "employee-service",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start employee-service: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    application.run_until_stopped().await?;

    Ok(())
}
