use anyhow::{Context, Result};
use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use privat_rates::wire::ClientMessage;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

#[derive(Parser, Debug)]
#[command(
    name = "rates-client",
    about = "Send one command to a running rates-server and print the raw reply"
)]
struct Args {
    /// Command to send
    #[arg(default_value = "exchange")]
    command: String,

    /// Server to connect to
    #[arg(long, default_value = "ws://127.0.0.1:8765", env = "RATES_URL")]
    url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let (mut ws, _) = connect_async(&args.url)
        .await
        .with_context(|| format!("connecting to {}", args.url))?;

    let envelope = serde_json::to_string(&ClientMessage::Command(args.command))?;
    ws.send(Message::Text(envelope.into())).await?;

    let reply = loop {
        let frame = ws
            .next()
            .await
            .context("server closed the connection without replying")??;
        match frame {
            Message::Text(text) => break text,
            Message::Close(_) => anyhow::bail!("server closed the connection without replying"),
            _ => continue,
        }
    };

    println!("{}", reply);
    ws.close(None).await.ok();

    Ok(())
}
