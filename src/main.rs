use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use snake_engine::config::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_INITIAL_LENGTH, EngineConfig, GridSize,
};
use snake_engine::server::{self, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "snake-server", version, about)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 4000)]
    port: u16,

    /// Width of the game behind `/api/game`.
    #[arg(long, default_value_t = i64::from(DEFAULT_GRID_WIDTH))]
    width: i64,

    /// Height of the game behind `/api/game`.
    #[arg(long, default_value_t = i64::from(DEFAULT_GRID_HEIGHT))]
    height: i64,

    /// Segments a fresh snake starts with.
    #[arg(long, default_value_t = DEFAULT_INITIAL_LENGTH)]
    initial_length: u16,

    /// Seed food placement for reproducible games. The default game uses the
    /// seed as given; the n-th session started uses seed + n.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory served under `/static`.
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snake_engine=info,snake_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let grid = GridSize::try_new(cli.width, cli.height)?;
    let config = EngineConfig::new(grid).with_initial_length(cli.initial_length);
    let state = AppState::new(config, cli.seed)?;
    let app = server::router(state, cli.static_dir.as_deref());

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, width = grid.width, height = grid.height, "snake server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
