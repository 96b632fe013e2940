//! `autoroute` binary: serves the demo controllers or lists their routes.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use autoroute::config::{load_config, AppConfig};
use autoroute::convention::path::join_paths;
use autoroute::demo;
use autoroute::lifecycle::{self, Shutdown};
use autoroute::routing::{Registrar, RouteTable};
use autoroute::HttpServer;

#[derive(Parser)]
#[command(name = "autoroute")]
#[command(about = "Convention-based controller routing on axum", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `server.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override `routing.append_trailing_slash`.
    #[arg(long)]
    trailing_slash: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the demo controllers (default)
    Serve,
    /// Print the routes the demo controllers produce
    Routes {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }
    if cli.trailing_slash {
        config.routing.append_trailing_slash = true;
    }

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Routes { json } => print_routes(&config, json),
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    lifecycle::init(&config)?;
    tracing::info!("autoroute v{} starting", env!("CARGO_PKG_VERSION"));

    let mut sink = lifecycle::route_sink(&config);
    demo::register_all(&Registrar::from_global(), &mut sink)?;
    tracing::info!(routes = sink.route_count(), base_path = %sink.base(), "Controllers registered");

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config.server.clone(), sink.into_router());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes(config: &AppConfig, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut table = RouteTable::new();
    demo::register_all(&Registrar::new(config.routing.registrar_options()), &mut table)?;

    let mut summaries = table.summaries();
    for summary in &mut summaries {
        summary.path = join_paths(&config.routing.base_path, &summary.path);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for summary in summaries {
        println!("{:<8} {:<24} {}", summary.verb, summary.path, summary.handlers.join(" → "));
    }
    Ok(())
}
