//! Process lifecycle: connect, register, serve, stop.

use std::sync::Arc;

use anyhow::Context;
use shelf_db::{Database, DbModule};
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Run the API until a shutdown signal arrives.
///
/// Fails before binding when no connection string is configured or the
/// database cannot be reached.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let connection_string = settings.require_connection_string()?;

    let database = Database::connect(connection_string, &settings.database)
        .await
        .context("failed to create MongoDB client")?;

    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(DbModule::new(database.clone())));
    modules::register_all(&mut registry, &database);

    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_all(&ctx).await?;
    registry.start_all(&ctx).await?;

    let served = shelf_http::start_server(&registry, &settings).await;

    registry
        .stop_all()
        .await
        .context("failed to stop modules")?;

    served
}

/// Registry with every module wired to in-memory stores; enough to build the
/// router or the OpenAPI document without a database.
pub fn offline_registry() -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_in_memory(&mut registry);
    registry
}
