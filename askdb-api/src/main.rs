use actix_web::{web, App, HttpServer};
use askdb_api::assistant::Assistant;
use askdb_api::config::{api_key_from_env, AppConfig};
use askdb_api::handlers;
use askdb_api::helpers::llm::create_llm_client;
use askdb_api::logging::init_logging;
use askdb_tools::{ensure_database, SqlExecutor};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "askdb-api")]
#[command(about = "Ask questions about the sample database in plain language", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// SQLite database file (created and seeded if missing)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Open the database read-only so generated writes are rejected
    #[arg(long)]
    read_only: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let mut app_config = AppConfig::load(cli.config.as_deref())?;
    if let Some(host) = cli.host {
        app_config.server.host = host;
    }
    if let Some(port) = cli.port {
        app_config.server.port = port;
    }
    if let Some(db) = cli.db {
        app_config.database.path = db;
    }
    if cli.read_only {
        app_config.database.read_only = true;
    }

    let api_key = api_key_from_env()?;

    let db_path = ensure_database(&app_config.database.path)?;
    info!(
        db_path = %db_path.display(),
        read_only = app_config.database.read_only,
        "Sample database ready"
    );

    let llm_client = create_llm_client(&app_config.gateway, api_key)?;
    let executor = SqlExecutor::new(db_path).read_only(app_config.database.read_only);
    let assistant = web::Data::new(Assistant::new(llm_client, executor));

    let bind_addr = (app_config.server.host.clone(), app_config.server.port);
    info!(
        "Starting askdb-api server at http://{}:{}",
        bind_addr.0, bind_addr.1
    );

    HttpServer::new(move || {
        App::new()
            .app_data(assistant.clone())
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
