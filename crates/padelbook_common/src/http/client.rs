// --- File: crates/padelbook_common/src/http/client.rs ---
use padelbook_config::ApiConfig;
use reqwest::{Client, Error as ReqwestError};
use std::time::Duration;

/// Creates the HTTP client used to reach the backend.
///
/// # Arguments
///
/// * `timeout_secs` - Request timeout in seconds. `None` leaves requests
///   without a deadline, so a hung backend keeps the caller waiting.
///
/// # Returns
///
/// A new reqwest::Client instance with the specified configuration
pub fn create_client(timeout_secs: Option<u64>) -> Result<Client, ReqwestError> {
    let builder = Client::builder().user_agent(concat!("padelbook/", env!("CARGO_PKG_VERSION")));
    match timeout_secs {
        Some(secs) => builder.timeout(Duration::from_secs(secs)).build(),
        None => builder.build(),
    }
}

/// Creates the HTTP client described by the `[api]` configuration section.
pub fn client_for(config: &ApiConfig) -> Result<Client, ReqwestError> {
    create_client(config.timeout_secs)
}
