//! Web proxy for the game ID verification service
//!
//! ```bash
//! GAME_ID_CHECKER_API_KEY=... cargo run --bin web_server -- --config config/checker.toml
//! ```

use clap::Parser;
use log::info;

use game_id_checker::common::logging::init_logger;
use game_id_checker::server::{ProxyServer, ServerConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/checker.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    info!("🚀 Initializing lookup proxy from {}...", args.config);
    let config = ServerConfig::from_file(&args.config)?;

    ProxyServer::new(config)?.run().await
}
