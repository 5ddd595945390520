//! HTTP client for the Shopify Admin GraphQL API.

mod fetch_all;
mod lookups;

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::json;
use shopex_core::{AppConfig, ProductFilters};

use crate::domain::{graphql_endpoint, normalize_shop_domain};
use crate::error::ClientError;
use crate::graphql::{GraphQlRequest, Operation, PRODUCTS_COUNT, SHOP_INFO};
use crate::rate_limit::{retry_with_backoff, throttle_pause};
use crate::types::{CountData, GraphQlResponse, ShopData, ShopInfo, ThrottleStatus};

pub use fetch_all::{FetchSummary, ProductPage};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Longest slice of an unexpected response body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Request, retry, and pacing knobs for [`ShopifyClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Products requested per page.
    pub page_size: u32,
    /// Additional attempts after the first failure for retriable errors.
    pub max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_secs * 2^attempt`.
    pub backoff_base_secs: u64,
    pub throttle_floor: u32,
    pub throttle_pause_ms: u64,
    /// Delay between pages of the vendor and tag lookups.
    pub lookup_delay_ms: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: "shopex/0.1 (product-export)".to_owned(),
            page_size: 25,
            max_retries: 3,
            backoff_base_secs: 2,
            throttle_floor: 100,
            throttle_pause_ms: 2000,
            lookup_delay_ms: 500,
        }
    }
}

impl From<&AppConfig> for ClientSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            request_timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            page_size: config.page_size,
            max_retries: config.max_retries,
            backoff_base_secs: config.retry_backoff_base_secs,
            throttle_floor: config.throttle_floor,
            throttle_pause_ms: config.throttle_pause_ms,
            lookup_delay_ms: config.lookup_delay_ms,
        }
    }
}

/// Client for one store's Admin GraphQL endpoint.
///
/// Maps 401/403 to [`ClientError::Unauthorized`], 429 and `THROTTLED` to
/// [`ClientError::RateLimited`], and 5xx to [`ClientError::ServerError`].
/// Transient failures are retried with exponential backoff; after every
/// successful call the reported query-cost bucket is checked and the client
/// pauses when it runs low.
pub struct ShopifyClient {
    client: Client,
    endpoint: Url,
    shop: String,
    access_token: String,
    settings: ClientSettings,
}

impl ShopifyClient {
    /// Creates a client for `https://{shop_domain}/admin/api/{api_version}/graphql.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidShopDomain`] for an unusable domain and
    /// [`ClientError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn new(
        shop_domain: &str,
        access_token: &str,
        api_version: &str,
        settings: ClientSettings,
    ) -> Result<Self, ClientError> {
        let shop = normalize_shop_domain(shop_domain)?;
        let endpoint = graphql_endpoint(&shop, api_version)?;
        Self::build(endpoint, shop, access_token, settings)
    }

    /// Creates a client that posts to an explicit endpoint URL (for testing
    /// with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidShopDomain`] if `endpoint` does not parse
    /// and [`ClientError::Http`] if the `reqwest::Client` cannot be constructed.
    pub fn with_endpoint(
        endpoint: &str,
        access_token: &str,
        settings: ClientSettings,
    ) -> Result<Self, ClientError> {
        let url = Url::parse(endpoint).map_err(|e| ClientError::InvalidShopDomain {
            input: endpoint.to_owned(),
            reason: e.to_string(),
        })?;
        let shop = url.host_str().unwrap_or(endpoint).to_owned();
        Self::build(url, shop, access_token, settings)
    }

    fn build(
        endpoint: Url,
        shop: String,
        access_token: &str,
        settings: ClientSettings,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            endpoint,
            shop,
            access_token: access_token.to_owned(),
            settings,
        })
    }

    /// The normalized shop host this client talks to.
    #[must_use]
    pub fn shop(&self) -> &str {
        &self.shop
    }

    /// Checks the access token by fetching the shop's name.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] when the token is rejected.
    /// - [`ClientError::GraphQl`] when the API answers with GraphQL errors.
    /// - any transport error after retries are exhausted.
    pub async fn validate_credentials(&self) -> Result<ShopInfo, ClientError> {
        let data: ShopData = self.execute(&SHOP_INFO, json!({})).await?;
        tracing::info!(shop = %self.shop, name = %data.shop.name, "credentials accepted");
        Ok(data.shop)
    }

    /// Counts products matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidFilters`] for an invalid filter
    /// combination, otherwise any error from the request.
    pub async fn fetch_product_count(&self, filters: &ProductFilters) -> Result<u64, ClientError> {
        filters.validate()?;
        let data: CountData = self
            .execute(&PRODUCTS_COUNT, json!({ "query": filters.search_query() }))
            .await?;
        let count = data.products_count;
        if count.precision.as_deref() == Some("AT_LEAST") {
            tracing::warn!(count = count.count, "product count is a lower bound");
        }
        Ok(count.count)
    }

    /// Sends one GraphQL operation with retry, then applies throttle pacing.
    pub(crate) async fn execute<T>(
        &self,
        operation: &Operation,
        variables: serde_json::Value,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let body = GraphQlRequest::new(operation, variables);

        let (data, throttle) =
            retry_with_backoff(self.settings.max_retries, self.settings.backoff_base_secs, || {
                self.send_once::<T>(operation, &body)
            })
            .await?;

        if let Some(pause) = throttle_pause(
            throttle.as_ref(),
            self.settings.throttle_floor,
            self.settings.throttle_pause_ms,
        ) {
            tracing::debug!(
                operation = operation.name,
                available = throttle.map(|t| t.currently_available),
                pause_ms = self.settings.throttle_pause_ms,
                "query-cost bucket low, pausing"
            );
            tokio::time::sleep(pause).await;
        }

        Ok(data)
    }

    async fn send_once<T>(
        &self,
        operation: &Operation,
        body: &GraphQlRequest<'_>,
    ) -> Result<(T, Option<ThrottleStatus>), ClientError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized {
                shop: self.shop.clone(),
                status: status.as_u16(),
            });
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.trim().parse::<f64>().ok())
                .map_or(0, seconds_ceil);
            return Err(ClientError::RateLimited {
                shop: self.shop.clone(),
                retry_after_secs,
            });
        }

        if status.is_server_error() {
            return Err(ClientError::ServerError {
                status: status.as_u16(),
                shop: self.shop.clone(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let text = response.text().await?;
        let parsed: GraphQlResponse<T> =
            serde_json::from_str(&text).map_err(|e| ClientError::Deserialize {
                context: format!("{} response from {}", operation.name, self.shop),
                source: e,
            })?;

        if let Some(first) = parsed.errors.first() {
            if parsed.errors.iter().any(|e| e.code() == Some("THROTTLED")) {
                return Err(ClientError::RateLimited {
                    shop: self.shop.clone(),
                    retry_after_secs: 1,
                });
            }
            return Err(ClientError::GraphQl {
                operation: operation.name.to_owned(),
                message: first.message.clone(),
            });
        }

        let throttle = parsed
            .extensions
            .and_then(|e| e.cost)
            .and_then(|c| c.throttle_status);

        let data = parsed.data.ok_or_else(|| ClientError::MissingData {
            operation: operation.name.to_owned(),
        })?;

        Ok((data, throttle))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn seconds_ceil(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        secs.ceil() as u64
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
