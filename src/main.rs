use anyhow::Context;
use lectern_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Lectern settings")?;
    lectern_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        backend = %settings.backend.base_url,
        "lectern console starting"
    );

    lectern_app::serve(&settings).await
}
