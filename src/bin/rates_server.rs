use anyhow::{Context, Result};
use clap::Parser;
use privat_rates::board::ExchangeBoard;
use privat_rates::{http, server};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "rates-server",
    about = "Serve the current EUR/USD exchange board over a WebSocket endpoint"
)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8765", env = "RATES_BIND")]
    bind: String,

    /// Outbound request timeout in seconds
    #[arg(long, default_value_t = http::DEFAULT_TIMEOUT_SECS, env = "RATES_TIMEOUT")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let client = http::build_client(Duration::from_secs(args.timeout))
        .context("building HTTP client")?;
    let board = ExchangeBoard::new(client);

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!("Listening on ws://{}", listener.local_addr()?);

    server::run(listener, board).await
}
