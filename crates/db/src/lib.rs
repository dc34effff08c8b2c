//! MongoDB connection handle shared by every module that persists documents.

use std::time::Duration;

use async_trait::async_trait;
use bson::doc;
use mongodb::{options::ClientOptions, Client, Collection};
use serde::{de::DeserializeOwned, Serialize};
use shelf_kernel::{settings::DatabaseSettings, InitCtx, Module};

pub mod error;

pub use error::{DbError, DbResult};

const APP_NAME: &str = "shelf";

/// Process-wide database handle. Cloning is cheap; all clones share one pool.
#[derive(Clone, Debug)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
}

impl Database {
    /// Parse the connection string and build a pooled client.
    ///
    /// The driver connects lazily, so this succeeds without a reachable server;
    /// call [`Database::ping`] to verify connectivity.
    pub async fn connect(connection_string: &str, settings: &DatabaseSettings) -> DbResult<Self> {
        let mut options = ClientOptions::parse(connection_string)
            .await
            .map_err(|e| DbError::InvalidConnectionString(e.to_string()))?;

        options.app_name = Some(APP_NAME.to_string());
        options.connect_timeout = Some(Duration::from_millis(settings.connect_timeout_ms));
        options.server_selection_timeout = Some(Duration::from_millis(settings.connect_timeout_ms));

        let name = resolve_database_name(
            settings.name.as_deref(),
            options.default_database.as_deref(),
        );

        let client =
            Client::with_options(options).map_err(|e| DbError::Connection(e.to_string()))?;
        let database = client.database(&name);

        tracing::info!(target: "shelf-db", database = %name, "database client created");

        Ok(Self { client, database })
    }

    pub fn name(&self) -> &str {
        self.database.name()
    }

    /// Typed handle to a collection in the configured database.
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        self.database.collection(name)
    }

    /// Round-trip a `ping` command to the server.
    pub async fn ping(&self) -> DbResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DbError::Connection(e.to_string()))?;

        Ok(())
    }

    /// Close pooled connections and wait for in-flight operations to finish.
    pub async fn shutdown(&self) {
        self.client.clone().shutdown().await;
        tracing::info!(target: "shelf-db", "database client shut down");
    }
}

/// Explicit setting first, then the default database of the URI, then the fallback.
pub fn resolve_database_name(configured: Option<&str>, from_uri: Option<&str>) -> String {
    configured
        .filter(|name| !name.is_empty())
        .or(from_uri.filter(|name| !name.is_empty()))
        .unwrap_or(DatabaseSettings::FALLBACK_NAME)
        .to_string()
}

/// Core module owning the database connection lifecycle.
pub struct DbModule {
    database: Database,
}

impl DbModule {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        self.database.ping().await?;
        tracing::info!(
            module = self.name(),
            database = %self.database.name(),
            "connected to MongoDB"
        );
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.database.shutdown().await;
        Ok(())
    }
}
