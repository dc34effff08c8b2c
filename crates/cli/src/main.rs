use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_kernel::settings::Settings;

/// Operator tooling for the books API
#[derive(Debug, Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Connect to MongoDB and serve the HTTP API
    Serve,
    /// Print the merged OpenAPI document
    Openapi {
        /// Emit compact JSON on one line
        #[arg(long)]
        compact: bool,
    },
    /// Print the resolved settings with credentials masked
    Config,
}

fn print_json(value: &serde_json::Value, compact: bool) -> anyhow::Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", rendered);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load Shelf settings")?;

    match cli.command {
        Command::Serve => {
            shelf_telemetry::init(&settings.telemetry);
            tracing::info!(env = ?settings.environment, "shelf serve starting");
            shelf_app::bootstrap::run(settings).await
        }
        Command::Openapi { compact } => {
            let registry = shelf_app::bootstrap::offline_registry();
            let spec = shelf_http::openapi::openapi_document(&registry, &settings);
            print_json(&spec, compact)
        }
        Command::Config => {
            let value = serde_json::to_value(settings.redacted())?;
            print_json(&value, false)
        }
    }
}
