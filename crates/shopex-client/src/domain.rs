//! Shop domain normalization and Admin API endpoint construction.

use reqwest::Url;

use crate::error::ClientError;

/// Normalizes user input into a bare shop host.
///
/// Accepts `"mystore.myshopify.com"`, `"https://mystore.myshopify.com/admin"`
/// or just the store handle `"mystore"`, which is expanded to
/// `"mystore.myshopify.com"`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidShopDomain`] when nothing usable remains
/// after stripping the scheme and path, or the host contains whitespace.
pub fn normalize_shop_domain(input: &str) -> Result<String, ClientError> {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    let host = without_scheme
        .split('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if host.is_empty() {
        return Err(ClientError::InvalidShopDomain {
            input: input.to_owned(),
            reason: "domain is empty".to_owned(),
        });
    }
    if host.chars().any(char::is_whitespace) {
        return Err(ClientError::InvalidShopDomain {
            input: input.to_owned(),
            reason: "domain contains whitespace".to_owned(),
        });
    }

    if host.contains('.') {
        Ok(host)
    } else {
        Ok(format!("{host}.myshopify.com"))
    }
}

/// Builds `https://{domain}/admin/api/{api_version}/graphql.json`.
///
/// # Errors
///
/// Returns [`ClientError::InvalidShopDomain`] if the domain is invalid or the
/// resulting URL does not parse.
pub fn graphql_endpoint(shop_domain: &str, api_version: &str) -> Result<Url, ClientError> {
    let host = normalize_shop_domain(shop_domain)?;
    let raw = format!("https://{host}/admin/api/{api_version}/graphql.json");
    Url::parse(&raw).map_err(|e| ClientError::InvalidShopDomain {
        input: shop_domain.to_owned(),
        reason: format!("\"{raw}\" is not a valid URL: {e}"),
    })
}
