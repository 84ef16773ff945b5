use std::time::Duration;

/// Where and how long to talk to the fee service.
///
/// `base_url` is the prefix the `/calculate` path is appended to, e.g.
/// `http://localhost:8080/api` or `https://fees.example/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Upper bound on a single call, connect through body.
    pub timeout: Duration,
}

impl ClientConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }
}
