/// Admin API version used when `SHOPEX_API_VERSION` is not set.
pub const DEFAULT_API_VERSION: &str = "2024-04";

/// Largest `first:` argument the Admin API accepts on a connection.
pub const MAX_PAGE_SIZE: u32 = 250;

#[derive(Clone)]
pub struct AppConfig {
    pub shop_domain: Option<String>,
    pub access_token: Option<String>,
    pub api_version: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_size: u32,
    pub max_retries: u32,
    pub retry_backoff_base_secs: u64,
    /// Pause before the next request once the available query cost falls
    /// below this value.
    pub throttle_floor: u32,
    pub throttle_pause_ms: u64,
    /// Delay between pages of the vendor and tag lookups.
    pub lookup_delay_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("shop_domain", &self.shop_domain)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_version", &self.api_version)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_size", &self.page_size)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .field("throttle_floor", &self.throttle_floor)
            .field("throttle_pause_ms", &self.throttle_pause_ms)
            .field("lookup_delay_ms", &self.lookup_delay_ms)
            .finish()
    }
}
