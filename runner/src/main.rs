use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

use clap::Parser;

/// Batch-processes parsed match bundles into analysis tables.
#[derive(Debug, clap::Parser)]
struct Args {
    /// Directory holding one JSON bundle per match, named after the tournament.
    #[arg(long)]
    input: std::path::PathBuf,

    /// DuckDB database file the tables are appended to.
    #[arg(long, default_value = "matches.duckdb")]
    database: std::path::PathBuf,

    /// Write JSON-lines directories to this folder instead of DuckDB.
    #[arg(long)]
    jsonl: Option<std::path::PathBuf>,

    /// Number of matches processed in parallel.
    #[arg(long, default_value_t = 4)]
    workers: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target().contains("runner") || meta.target().contains("transform")
        }));
    tracing::subscriber::set_global_default(registry).unwrap();

    tracing::info!("Starting...");

    let args = Args::parse();

    let paths = match runner::batch::discover_bundles(&args.input) {
        Ok(paths) => paths,
        Err(err) => {
            tracing::error!("Reading {}: {}", args.input.display(), err);
            std::process::exit(1);
        }
    };
    tracing::info!("Found {} match bundles in {}", paths.len(), args.input.display());

    let drops = runner::config::DropColumns::default();

    let summary = match args.jsonl {
        Some(folder) => {
            tracing::info!("Writing JSON-lines tables to {}", folder.display());
            runner::batch::run(paths, args.workers, drops, runner::store::JsonlStore::new(folder))
                .await
        }
        None => {
            let store = match runner::store::DuckDbStore::open(&args.database) {
                Ok(store) => store,
                Err(err) => {
                    tracing::error!("Opening {}: {}", args.database.display(), err);
                    std::process::exit(1);
                }
            };
            tracing::info!("Appending tables to {}", args.database.display());
            runner::batch::run(paths, args.workers, drops, store).await
        }
    };

    tracing::info!(
        "Processed {} matches: {} stored, {} failed",
        summary.processed,
        summary.succeeded,
        summary.failed
    );

    if summary.processed > 0 && summary.succeeded == 0 {
        std::process::exit(1);
    }
}
