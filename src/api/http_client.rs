use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

pub fn build_api_client() -> Client {
    build_api_client_with_timeout(DEFAULT_REQUEST_TIMEOUT_SECS)
}

pub fn build_api_client_with_timeout(timeout_secs: u64) -> Client {
    Client::builder()
        .user_agent(concat!("dianti/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_idle_timeout(Duration::from_secs(90))
        .tcp_keepalive(Duration::from_secs(60))
        .build()
        .unwrap_or_else(|_| Client::new())
}
