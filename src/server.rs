use crate::board::ExchangeBoard;
use crate::dispatch::dispatch;
use crate::wire::ClientMessage;
use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Accepts connections forever, serving each one from its own task.
pub async fn run(listener: TcpListener, board: ExchangeBoard) -> Result<()> {
    loop {
        let (stream, peer) = listener.accept().await.context("accepting connection")?;
        let board = board.clone();
        tokio::spawn(async move {
            info!("{} connected", peer);
            match handle_connection(stream, board).await {
                Ok(()) => info!("{} disconnected", peer),
                Err(e) => warn!("{} dropped: {:#}", peer, e),
            }
        });
    }
}

/// One command per received frame, replied to on the same connection before
/// the next frame is read. Frames that do not parse as a command envelope
/// are dropped without a reply and the connection stays open.
async fn handle_connection(stream: TcpStream, board: ExchangeBoard) -> Result<()> {
    let mut ws = tokio_tungstenite::accept_async(stream)
        .await
        .context("websocket handshake failed")?;

    while let Some(frame) = ws.next().await {
        let msg = match frame? {
            Message::Text(text) => text,
            Message::Close(_) => break,
            other => {
                debug!("ignoring non-text frame: {}", other);
                continue;
            }
        };

        let command = match serde_json::from_str::<ClientMessage>(&msg) {
            Ok(ClientMessage::Command(command)) => command,
            Err(e) => {
                debug!("ignoring malformed message '{}': {}", msg, e);
                continue;
            }
        };

        let reply = dispatch(&board, &command).await;
        let json = serde_json::to_string(&reply).context("serializing reply")?;
        ws.send(Message::Text(json.into())).await?;
    }

    Ok(())
}
