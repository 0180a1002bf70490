//! tapdexd — the TapDex daemon.
//!
//! Single binary that assembles the panel subsystems:
//! - Catalog + rule table (TOML)
//! - Panel session (single-writer, behind one mutex)
//! - Ticker-driven repricing loop
//! - Seeded random sale driver, standing in for the till
//!
//! # Usage
//!
//! ```text
//! tapdexd simulate --catalog demos/panel.toml --tick-secs 10 --duration-secs 120
//! ```

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tracing::info;

use tapdex_core::{Catalog, RuleTable};
use tapdex_session::PanelSession;
use tapdex_ticker::{Ticker, format_countdown};

#[derive(Parser)]
#[command(name = "tapdexd", about = "TapDex daemon", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a panel with simulated sales until Ctrl-C or the duration
    /// elapses.
    Simulate {
        /// Path to the catalog TOML.
        #[arg(long, default_value = "demos/panel.toml")]
        catalog: PathBuf,

        /// Repricing interval in seconds.
        #[arg(long, default_value = "10")]
        tick_secs: u64,

        /// Stop after this many seconds; omit to run until Ctrl-C.
        #[arg(long)]
        duration_secs: Option<u64>,

        /// Seed for the sale driver, for reproducible runs.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Final board output format: text or json.
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tapdexd=debug,tapdex=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate {
            catalog,
            tick_secs,
            duration_secs,
            seed,
            format,
        } => run_simulate(&catalog, tick_secs, duration_secs, seed, &format).await,
    }
}

async fn run_simulate(
    catalog_path: &PathBuf,
    tick_secs: u64,
    duration_secs: Option<u64>,
    seed: u64,
    format: &str,
) -> anyhow::Result<()> {
    let catalog = Catalog::from_file(catalog_path)?;
    let item_ids: Vec<String> = catalog.items.iter().map(|e| e.id.clone()).collect();
    info!(
        path = ?catalog_path,
        items = item_ids.len(),
        rules = catalog.rules.len(),
        "catalog loaded"
    );

    let rules = RuleTable::from(catalog.rules);
    let session = Arc::new(Mutex::new(PanelSession::from_catalog(
        catalog.items,
        rules,
        catalog.params,
        epoch_millis(),
    )?));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ticker = Ticker::new(Duration::from_secs(tick_secs));

    // ── Repricing loop ─────────────────────────────────────────────

    let tick_session = session.clone();
    let tick_handle = tokio::spawn({
        let ticker = ticker.clone();
        let shutdown = shutdown_rx.clone();
        async move {
            ticker
                .run(
                    move || {
                        let now = epoch_millis();
                        let mut session =
                            tick_session.lock().expect("panel session lock poisoned");
                        let changed = session.reprice(now);
                        info!(changed, "tick repriced");
                        for row in session.board(now) {
                            info!(
                                item = %row.stock_name,
                                price = row.price,
                                trend = row.status.label(),
                                sold = row.sale_count,
                                on_hand = row.inventory_on_hand,
                                updated = %row.updated,
                                "board"
                            );
                        }
                    },
                    shutdown,
                )
                .await;
        }
    });

    // ── Sale driver ────────────────────────────────────────────────

    let sale_session = session.clone();
    let mut sale_shutdown = shutdown_rx.clone();
    let sale_handle = tokio::spawn(async move {
        let mut rng = StdRng::seed_from_u64(seed);
        loop {
            let wait = rng.gen_range(400..1600);
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_millis(wait)) => {
                    let id = &item_ids[rng.gen_range(0..item_ids.len())];
                    let quantity = rng.gen_range(1..=3);
                    let now = epoch_millis();
                    let mut session =
                        sale_session.lock().expect("panel session lock poisoned");
                    let price = session.current_price(id);
                    session.record_sale(id, quantity, now, price);
                }
                _ = sale_shutdown.changed() => break,
            }
        }
    });

    info!(
        tick = %format_countdown(ticker.seconds_until_tick()),
        "simulation running"
    );

    // ── Shutdown ───────────────────────────────────────────────────

    match duration_secs {
        Some(secs) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => info!("shutdown signal received"),
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {
                    info!(secs, "simulation window elapsed");
                }
            }
        }
        None => {
            tokio::signal::ctrl_c().await?;
            info!("shutdown signal received");
        }
    }
    shutdown_tx.send(true)?;

    let _ = tick_handle.await;
    let _ = sale_handle.await;

    // ── Final board ────────────────────────────────────────────────

    let now = epoch_millis();
    let session = session.lock().expect("panel session lock poisoned");
    let board = session.board(now);
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        println!(
            "{:<14} {:>8} {:>8}  {:<8} {:>6} {:>8}  {}",
            "ITEM", "PRICE", "LISTED", "TREND", "SOLD", "ON HAND", "UPDATED"
        );
        for row in &board {
            println!(
                "{:<14} {:>8.2} {:>8.2}  {:<1} {:<6} {:>6} {:>8}  {}",
                row.stock_name,
                row.price,
                row.original_price,
                row.status.symbol(),
                row.status.label(),
                row.sale_count,
                row.inventory_on_hand,
                row.updated
            );
        }
    }

    info!("tapdexd stopped");
    Ok(())
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
