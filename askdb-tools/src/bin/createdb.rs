use askdb_tools::ensure_database;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "askdb-createdb")]
#[command(about = "Create and seed the askdb sample SQLite database", long_about = None)]
#[command(version)]
struct Cli {
    /// Where to create the database file
    #[arg(default_value = "database.db")]
    db_path: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let existed = cli.db_path.exists();
    let path = ensure_database(&cli.db_path)?;

    if existed {
        tracing::info!(db_path = %path.display(), "Database already exists; nothing to do");
    } else {
        println!("Database '{}' created successfully!", path.display());
    }

    Ok(())
}
