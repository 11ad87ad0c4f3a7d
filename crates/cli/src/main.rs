use anyhow::Context;
use clap::{Parser, Subcommand};

use kelola_kernel::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "kelola", version, about = "Books and school administration CRUD services")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until interrupted
    Serve {
        /// Override `server.port` from configuration
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document to stdout
    Openapi {
        #[arg(long)]
        pretty: bool,
    },
    /// Print the resolved configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load KELOLA settings")?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            serve(settings)
        }
        Command::Openapi { pretty } => {
            let registry = kelola_app::build_registry(&settings)?;
            let document = kelola_http::router::openapi_document(&registry);
            let rendered = if pretty {
                serde_json::to_string_pretty(&document)?
            } else {
                serde_json::to_string(&document)?
            };
            println!("{rendered}");
            Ok(())
        }
        Command::Config => {
            println!("{settings:#?}");
            Ok(())
        }
    }
}

fn serve(settings: Settings) -> anyhow::Result<()> {
    kelola_telemetry::init(&settings.telemetry)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .with_context(|| "failed to start tokio runtime")?;

    tracing::info!(
        env = ?settings.environment,
        port = settings.server.port,
        "kelola serve starting"
    );
    runtime.block_on(kelola_app::run(settings))
}
