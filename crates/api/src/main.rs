use anyhow::Context;

use mk8gate_api::config::GateConfig;
use mk8gate_observability::LogFormat;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_format = match std::env::var("LOG_FORMAT") {
        Ok(v) => v.parse::<LogFormat>().map_err(anyhow::Error::msg)?,
        Err(_) => LogFormat::default(),
    };
    mk8gate_observability::init(log_format);

    let config = GateConfig::from_env()?;
    let app = mk8gate_api::app::build_app(&config)?;

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        account_api = %config.account_api_url,
        upstream = config.upstream_url.as_deref().unwrap_or("<none>"),
        "mk8gate listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
