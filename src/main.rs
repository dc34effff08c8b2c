use anyhow::Context;
use shelf_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Shelf settings")?;
    shelf_telemetry::init(&settings.telemetry);

    tracing::info!(env = ?settings.environment, "shelf-app bootstrap starting");

    if let Err(error) = shelf_app::bootstrap::run(settings).await {
        tracing::error!(error = ?error, "shelf-app terminated");
        return Err(error);
    }

    tracing::info!("shelf-app shut down cleanly");
    Ok(())
}
