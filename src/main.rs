use anyhow::Context;
use kelola_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load KELOLA settings")?;
    kelola_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        "kelola-app bootstrap starting"
    );

    kelola_app::run(settings).await?;

    tracing::info!("kelola-app shut down");
    Ok(())
}
