pub mod board;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod http;
pub mod server;
pub mod types;
pub mod wire;

// Re-exports for convenience
pub use board::ExchangeBoard;
pub use error::{DayLimitExceeded, FetchError, FetchKind};
pub use history::{RateHistory, DEFAULT_BASE_URL, MAX_HISTORY_DAYS};
pub use types::{BoardQuote, BoardSnapshot, CurrencyQuote, DaySnapshot};
pub use wire::{ClientMessage, ServerMessage};
