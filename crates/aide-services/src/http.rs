//! Shared HTTP client construction.

use std::time::Duration;

use aide_core::{AssistantError, Result, SessionConfig};

/// Build the HTTP client shared by the web collaborators.
pub fn client(user_agent: &str, timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| AssistantError::Internal(format!("Failed to build HTTP client: {}", e)))
}

/// Build the HTTP client described by a session configuration.
pub fn client_for(config: &SessionConfig) -> Result<reqwest::Client> {
    client(&config.user_agent, config.request_timeout())
}

/// Map a transport or status error from `service` into the error taxonomy.
pub(crate) fn service_error(service: &str, err: reqwest::Error) -> AssistantError {
    if err.is_timeout() {
        AssistantError::unavailable(service, "request timed out")
    } else {
        AssistantError::unavailable(service, err)
    }
}

/// Trim the trailing slash from a configured base URL.
pub(crate) fn base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
