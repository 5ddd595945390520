pub mod client;
pub mod domain;
pub mod error;
pub mod graphql;
pub mod pagination;
pub(crate) mod rate_limit;
pub mod types;

pub use client::{ClientSettings, FetchSummary, ProductPage, ShopifyClient};
pub use error::ClientError;
pub use types::{Product, Publication, ShopInfo, Variant};
