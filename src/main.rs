//! StrategyConsole - Main Entry Point
//!
//! A command-line console over the strategy store admin API: lists
//! strategies, shows aggregate stats, and surfaces the records that the
//! editor operates on.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use strategy_console::config;
use strategy_console::console::StrategyList;
use strategy_console::store::RestStrategyStore;
use strategy_console::strategy::types::StrategyStatus;
use strategy_console::StrategyStore;

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Filter the listing by status (active, paused, stopped, draft)
    #[arg(long)]
    status: Option<String>,

    /// Free-text search over strategy names
    #[arg(long)]
    search: Option<String>,

    /// Restrict the listing to one user's strategies
    #[arg(long)]
    user: Option<String>,

    /// Page to fetch
    #[arg(long, default_value_t = 1)]
    page: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting StrategyConsole");
    info!("Configuration file: {}", args.config);

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let app_config = config::load_config(Some(&args.config))?;
    let store = Arc::new(RestStrategyStore::from_config(&app_config.store)?);

    let stats = store.strategy_stats().await?;
    info!(
        total = stats.total_strategies,
        active = stats.active_strategies,
        paused = stats.paused_strategies,
        users = stats.total_users,
        "strategy stats"
    );

    let mut list = StrategyList::new(store);
    list.set_page_size(app_config.settings.page_size);
    list.set_status_tab(parse_status(args.status.as_deref()));
    list.set_search(args.search);
    list.set_user_filter(args.user);
    // filter setters reset to page 1, so apply the requested page last
    list.set_page(args.page);
    list.refresh().await?;

    info!(
        page = list.page(),
        pages = list.pages(),
        total = list.total(),
        "strategy listing"
    );
    for strategy in list.items() {
        println!(
            "{}  {:<30}  {:<16}  {:<8}  legs={}",
            strategy.id,
            strategy.name,
            strategy.strategy_type,
            strategy.status,
            strategy.order_legs.len()
        );
    }

    Ok(())
}

fn parse_status(raw: Option<&str>) -> Option<StrategyStatus> {
    match raw?.to_lowercase().as_str() {
        "active" => Some(StrategyStatus::Active),
        "paused" => Some(StrategyStatus::Paused),
        "stopped" => Some(StrategyStatus::Stopped),
        "draft" => Some(StrategyStatus::Draft),
        other => {
            tracing::warn!("unknown status filter: {}", other);
            None
        }
    }
}
