use shopex_core::FilterError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("authentication failed for {shop} (HTTP {status}); check the Admin API access token")]
    Unauthorized { shop: String, status: u16 },

    #[error("rate limited by {shop} (retry after {retry_after_secs}s)")]
    RateLimited { shop: String, retry_after_secs: u64 },

    #[error("server error HTTP {status} from {shop}")]
    ServerError { status: u16, shop: String },

    #[error("unexpected HTTP status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("GraphQL error in {operation}: {message}")]
    GraphQl { operation: String, message: String },

    #[error("response to {operation} carried no data")]
    MissingData { operation: String },

    #[error("pagination limit reached for {operation}: exceeded {max_pages} pages")]
    PaginationLimit { operation: String, max_pages: usize },

    #[error("pagination for {operation} returned cursor {cursor} twice")]
    RepeatedCursor { operation: String, cursor: String },

    #[error("invalid shop domain \"{input}\": {reason}")]
    InvalidShopDomain { input: String, reason: String },

    #[error("invalid filters: {0}")]
    InvalidFilters(#[from] FilterError),
}
