use std::time::Duration;

/// Outbound request timeout unless overridden on the command line.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for both fetchers. The bank endpoint is called with
/// one fresh connection per request and without certificate verification.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("privat-rates/0.1")
        .timeout(timeout)
        .danger_accept_invalid_certs(true)
        .pool_max_idle_per_host(0)
        .build()
}
