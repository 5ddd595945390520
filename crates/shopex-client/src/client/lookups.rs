use std::collections::BTreeSet;
use std::time::Duration;

use serde_json::json;

use super::ShopifyClient;
use crate::error::ClientError;
use crate::graphql::{LOOKUP_PAGE_SIZE, PRODUCT_TAGS, PRODUCT_VENDORS, PUBLICATIONS};
use crate::pagination::{CursorTracker, MAX_PAGES};
use crate::types::{Publication, PublicationsData, TagsData, VendorsData};

impl ShopifyClient {
    /// Distinct non-empty vendor names across all products, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on any request or pagination failure.
    pub async fn fetch_vendors(&self) -> Result<Vec<String>, ClientError> {
        let mut tracker = CursorTracker::new(PRODUCT_VENDORS.name, MAX_PAGES);
        let mut vendors = BTreeSet::new();
        let mut cursor: Option<String> = None;

        loop {
            if tracker.begin_page()? > 1 {
                self.lookup_delay().await;
            }
            let data: VendorsData = self
                .execute(
                    &PRODUCT_VENDORS,
                    json!({ "first": LOOKUP_PAGE_SIZE, "after": cursor }),
                )
                .await?;
            let page_info = data.products.page_info.clone();
            vendors.extend(
                data.products
                    .into_nodes()
                    .into_iter()
                    .map(|n| n.vendor.trim().to_owned())
                    .filter(|v| !v.is_empty()),
            );
            match tracker.advance(&page_info)? {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        tracing::debug!(pages = tracker.pages(), vendors = vendors.len(), "vendors fetched");
        Ok(vendors.into_iter().collect())
    }

    /// Distinct non-empty product tags in the store, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on any request or pagination failure.
    pub async fn fetch_tags(&self) -> Result<Vec<String>, ClientError> {
        let mut tracker = CursorTracker::new(PRODUCT_TAGS.name, MAX_PAGES);
        let mut tags = BTreeSet::new();
        let mut cursor: Option<String> = None;

        loop {
            if tracker.begin_page()? > 1 {
                self.lookup_delay().await;
            }
            let data: TagsData = self
                .execute(
                    &PRODUCT_TAGS,
                    json!({ "first": LOOKUP_PAGE_SIZE, "after": cursor }),
                )
                .await?;
            let connection = data.shop.product_tags;
            let page_info = connection.page_info.clone();
            tags.extend(
                connection
                    .into_nodes()
                    .into_iter()
                    .map(|t| t.trim().to_owned())
                    .filter(|t| !t.is_empty()),
            );
            match tracker.advance(&page_info)? {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        tracing::debug!(pages = tracker.pages(), tags = tags.len(), "tags fetched");
        Ok(tags.into_iter().collect())
    }

    /// Sales channels (publications) of the store, in API order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on any request failure.
    pub async fn fetch_publications(&self) -> Result<Vec<Publication>, ClientError> {
        let data: PublicationsData = self.execute(&PUBLICATIONS, json!({})).await?;
        if data.publications.page_info.has_next_page {
            tracing::warn!("store has more than 25 sales channels; listing the first 25");
        }
        Ok(data.publications.into_nodes())
    }

    async fn lookup_delay(&self) {
        if self.settings.lookup_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.settings.lookup_delay_ms)).await;
        }
    }
}
