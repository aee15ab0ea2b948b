use anyhow::{Context, Result};
use clap::Parser;
use privat_rates::history::RateHistory;
use privat_rates::http;
use privat_rates::types::currency_allow_list;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "privat-rates",
    about = "Fetch PrivatBank exchange rates for the last N days and print them as JSON"
)]
struct Args {
    /// How many past days to fetch (up to 10)
    days: u32,

    /// Extra currency codes to include besides EUR and USD
    currencies: Vec<String>,

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

    let allowed = currency_allow_list(&args.currencies);
    info!(
        "Fetching rates for the last {} day(s), currencies: {}",
        args.days,
        allowed.join(", ")
    );

    let client = http::build_client(Duration::from_secs(args.timeout))
        .context("building HTTP client")?;
    let history = RateHistory::new(client);

    match history.fetch_days(args.days, &allowed).await {
        Ok(snapshots) => println!("{}", serde_json::to_string_pretty(&snapshots)?),
        Err(e) => println!("{}", e),
    }

    Ok(())
}
