use anyhow::Context;

use erpsuite_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    erpsuite_observability::init(&config.logging);

    if config.auth.jwt_secret == "dev-secret" {
        tracing::warn!("auth.jwt_secret not set; using insecure dev default");
    }

    let app = erpsuite_api::app::build_app(&config);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
