//! HTTP client construction

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create the HTTP client used for backend calls.
///
/// `timeout` bounds a whole request; `None` leaves requests unbounded so a
/// stalled backend stalls the caller.
pub fn create_client(timeout: Option<Duration>) -> reqwest::Result<Client> {
    let mut builder = ClientBuilder::new().connect_timeout(CONNECT_TIMEOUT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}
