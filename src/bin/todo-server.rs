use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use todo_api::config::{Overrides, ServerConfig};
use todo_api::store::{MemoryTodoStore, load_seed_file};

#[derive(Parser, Debug)]
#[command(name = "todo-server", version, about = "Serve the todo list API")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Address to listen on, e.g. 127.0.0.1:4567
    #[arg(long)]
    bind: Option<String>,
    /// JSON file with todos to load at start-up
    #[arg(long)]
    seed: Option<PathBuf>,
    /// error|warn|info|debug|trace
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let overrides = Overrides { bind: cli.bind, seed_path: cli.seed, log_level: cli.log_level };
    let cfg = ServerConfig::load(cli.config.as_deref(), &overrides)?;
    todo_api::logger::init_for_server(&cfg)?;

    let store = MemoryTodoStore::new("todos");
    if let Some(path) = &cfg.seed_path {
        store.seed(load_seed_file(path)?)?;
    }
    let app = todo_api::router(Arc::new(store));

    let addr = cfg.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    log::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
