/// Runtime configuration for an export run, loaded from the environment.
///
/// Everything is defaulted; the binary works with no environment at all.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the product API. Overridden in tests to point at a mock
    /// server.
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Request profile for the fetcher: `"direct"` or `"browser"`.
    pub fetch_mode: String,
}
