//! # check-id
//!
//! Command-line front end: checks one account against the verification
//! service and prints the result.
//!
//! ## Usage
//!
//! ```bash
//! export GAME_ID_CHECKER_API_KEY=...
//! cargo run --bin check-id -- --game ml --id 555 --zone 9
//! cargo run --bin check-id -- --config config/checker.toml --game genshin --id 777 --server Europe
//! cargo run --bin check-id -- --list-games
//! ```
//!
//! Exit status: 0 if the account was found, 1 if the lookup failed, 2 if the
//! input was rejected before anything was sent.

use clap::Parser;
use log::error;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use game_id_checker::catalog::{find_game, DEFAULT_SERVER, GAMES, SERVERS};
use game_id_checker::client::{
    ClientConfig, LookupMetrics, LookupMiddleware, LookupSession, VerificationClient,
};
use game_id_checker::common::config::load_config;
use game_id_checker::common::logging::init_logger;
use game_id_checker::common::messages::LookupOutcome;

/// Command-line arguments for the checker
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML configuration file with a `[service]` table
    ///
    /// Without it, settings come from defaults and the environment.
    #[arg(short, long)]
    config: Option<String>,

    /// Catalog key of the game (see --list-games)
    #[arg(short, long, required_unless_present = "list_games")]
    game: Option<String>,

    /// In-game account ID
    #[arg(short, long, required_unless_present = "list_games")]
    id: Option<String>,

    /// Zone ID (Mobile Legends)
    #[arg(short, long, default_value = "")]
    zone: String,

    /// Server region (Genshin Impact)
    #[arg(short, long, default_value = DEFAULT_SERVER)]
    server: String,

    /// Print the supported games and exit
    #[arg(long)]
    list_games: bool,

    /// Print lookup statistics after the result
    #[arg(long)]
    stats: bool,
}

fn print_games() {
    println!("{:<10} {:<22} EXTRA", "KEY", "GAME");
    for game in &GAMES {
        let extra = if game.requires_zone {
            "--zone".to_string()
        } else if game.requires_server {
            format!("--server {}", SERVERS.join("|"))
        } else {
            String::new()
        };
        println!("{:<10} {:<22} {}", game.id, game.display_name, extra);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_logger();

    let args = Args::parse();

    if args.list_games {
        print_games();
        return Ok(ExitCode::SUCCESS);
    }

    let game_key = args.game.unwrap_or_default();
    let Some(game) = find_game(game_key.trim()) else {
        error!("Unknown game '{}'; try --list-games", game_key);
        return Ok(ExitCode::from(2));
    };

    let config: ClientConfig = match &args.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };
    let service = config.service.with_env();

    let client = Arc::new(VerificationClient::new(&service)?);
    let metrics = Arc::new(Mutex::new(LookupMetrics::new()));
    let middleware = LookupMiddleware::new(client).with_metrics(metrics.clone());

    let session = LookupSession::new()
        .select_game(Some(game))
        .set_account_id(args.id.unwrap_or_default().trim())
        .set_zone_id(args.zone.trim())
        .set_server(args.server.trim());

    if let Err(e) = session.form().check() {
        error!("{}", e);
        return Ok(ExitCode::from(2));
    }

    let session = middleware.run(session).await;

    let code = match session.outcome() {
        Some(LookupOutcome::Success { username }) => {
            println!("✅ {} account found: {}", game.display_name, username);
            ExitCode::SUCCESS
        }
        Some(LookupOutcome::Failure { reason }) => {
            println!("❌ {} lookup failed: {}", game.display_name, reason);
            ExitCode::FAILURE
        }
        None => ExitCode::FAILURE,
    };

    if args.stats {
        if let Ok(metrics) = metrics.lock() {
            println!("{}", serde_json::to_string_pretty(&metrics.snapshot_json())?);
        }
    }

    Ok(code)
}
