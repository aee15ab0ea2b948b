use crate::board::ExchangeBoard;
use crate::wire::ServerMessage;
use tracing::warn;

/// Turns a parsed command into its reply envelope. Never fails: fetch
/// problems and unknown commands both come back as error envelopes.
pub async fn dispatch(board: &ExchangeBoard, command: &str) -> ServerMessage {
    match command {
        "exchange" => match board.snapshot().await {
            Ok(rates) => ServerMessage::ExchangeData(rates),
            Err(e) => {
                warn!("exchange command failed: {}", e);
                ServerMessage::Error(e.to_string())
            }
        },
        other => ServerMessage::Error(format!("Unknown command: {}", other)),
    }
}
