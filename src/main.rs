use anyhow::Context;
use clap::{Parser, Subcommand};
use misslog::admin::{self, AdminState};
use misslog::guard::{Capability, Nonce, REMOVE_ACTION};
use misslog::page;
use misslog_core::config::Config;
use misslog_core::{remove_by_rank, sorted_view, JsonFileKv, LedgerStore, RankSet, SortMode};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "misslog", about = "Missed Search Log — track searches that found nothing")]
struct Cli {
    /// Write debug logs to /tmp/misslog-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the admin/intake HTTP surface.
    Serve {
        /// Address to bind, overriding the configured one.
        #[arg(long)]
        listen: Option<String>,
    },
    /// Record one missed search from the command line.
    Record {
        /// The exact query text, case-sensitive and untrimmed.
        query: String,
    },
    /// Print the ranked ledger view.
    List {
        /// Sort order: date, count, or alpha.
        #[arg(long, default_value = "date")]
        sort: SortMode,
    },
    /// Remove records by rank (single rank or comma-delimited list).
    ///
    /// Ranks resolve against the current date-descending order, same as the
    /// admin page's removal links.
    Remove {
        ranks: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/misslog-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("misslog debug log started — tail -f /tmp/misslog-debug.log");
    }

    let config = Config::load().unwrap_or_else(|_| Config::defaults());
    let store = LedgerStore::new(
        JsonFileKv::new(config.store.resolved_data_dir()),
        config.store.record_key.clone(),
    );

    match cli.command {
        Command::Serve { listen } => {
            let addr = listen.unwrap_or_else(|| config.admin.listen.clone());
            let default_sort = config
                .admin
                .default_sort
                .parse()
                .unwrap_or(SortMode::Date);
            let state = Arc::new(AdminState {
                store,
                capability: Capability::from_token(&config.admin.capability_token),
                nonce: Nonce::issue(REMOVE_ACTION),
                default_sort,
            });

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            tracing::info!(%addr, "misslog admin surface listening");
            axum::serve(listener, admin::router(state)).await?;
        }
        Command::Record { query } => {
            store
                .record_miss(&query)
                .context("failed to record missed search")?;
        }
        Command::List { sort } => {
            let ledger = store.load().context("failed to load ledger")?;
            let view = sorted_view(&ledger, sort);
            if view.is_empty() {
                println!("No missed searches");
            } else {
                println!("{:>4}  {:>6}  {:>10}  term", "rank", "count", "last");
                for entry in view {
                    println!(
                        "{:>4}  {:>6}  {:>10}  {}",
                        entry.rank,
                        entry.record.count,
                        page::format_latest(entry.record.latest),
                        entry.query
                    );
                }
            }
        }
        Command::Remove { ranks } => {
            let removed =
                remove_by_rank(&store, &RankSet::parse(&ranks)).context("removal failed")?;
            println!("Removed {removed} search terms");
        }
    }

    Ok(())
}
