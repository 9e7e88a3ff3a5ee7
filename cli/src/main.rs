pub mod commands;

use clap::Parser;
use commands::Commands;
use log::error;
use shared::{
    config::{render::RenderConfig, server::ServerConfig},
    env,
    error::RenderResult,
    logger,
};

/// 🌀 Mandelbrot rendering service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    env::init();
    logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command).await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> RenderResult<()> {
    match command {
        Commands::Server(args) => {
            let config = args.into_config(ServerConfig::from_env()?)?;
            server::run_server(config).await;
        }
        Commands::Render(args) => args.run(RenderConfig::from_env()?)?,
    }

    Ok(())
}
