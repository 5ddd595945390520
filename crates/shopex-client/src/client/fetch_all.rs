use std::collections::HashSet;

use serde_json::json;
use shopex_core::ProductFilters;

use super::ShopifyClient;
use crate::error::ClientError;
use crate::graphql::{INLINE_VARIANTS, LOOKUP_PAGE_SIZE, PRODUCTS_PAGE, PRODUCT_VARIANTS};
use crate::pagination::{CursorTracker, MAX_PAGES};
use crate::types::{PageInfo, Product, ProductVariantsData, ProductsData};

/// One page of products as returned by the API.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page_info: PageInfo,
}

/// Totals for a completed product walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub pages: usize,
    pub products: usize,
    pub variants: usize,
}

impl ShopifyClient {
    /// Fetches a single page of products matching `filters`.
    ///
    /// Variants beyond the first [`INLINE_VARIANTS`] are *not* fetched here;
    /// see [`ShopifyClient::fetch_products`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidFilters`] for invalid filters, otherwise
    /// any error from the request.
    pub async fn fetch_products_page(
        &self,
        filters: &ProductFilters,
        cursor: Option<&str>,
        first: u32,
    ) -> Result<ProductPage, ClientError> {
        filters.validate()?;
        let variables = json!({
            "first": first.clamp(1, 250),
            "after": cursor,
            "query": filters.search_query(),
            "sortKey": filters.sort.sort_key(),
            "reverse": filters.sort.reverse(),
            "variantsFirst": INLINE_VARIANTS,
        });
        let data: ProductsData = self.execute(&PRODUCTS_PAGE, variables).await?;
        let page_info = data.products.page_info.clone();
        Ok(ProductPage {
            products: data.products.into_nodes(),
            page_info,
        })
    }

    /// Walks every product matching `filters`, handing each completed page to
    /// `on_page`.
    ///
    /// - Stops once `limit` products have been delivered (the last page is
    ///   truncated); `None` walks the whole catalog.
    /// - Products whose variant list spans several pages are completed before
    ///   their page is delivered.
    /// - A product id already delivered is skipped, so every product reaches
    ///   `on_page` exactly once.
    ///
    /// # Errors
    ///
    /// Any [`ClientError`] (converted into `E`) aborts the walk, as does an
    /// error returned by `on_page`.
    pub async fn fetch_products<F, E>(
        &self,
        filters: &ProductFilters,
        limit: Option<u32>,
        mut on_page: F,
    ) -> Result<FetchSummary, E>
    where
        F: FnMut(Vec<Product>) -> Result<(), E>,
        E: From<ClientError>,
    {
        filters.validate().map_err(ClientError::from)?;
        let limit = limit.filter(|&n| n > 0).map(|n| n as usize);

        let mut tracker = CursorTracker::new(PRODUCTS_PAGE.name, MAX_PAGES);
        let mut seen: HashSet<String> = HashSet::new();
        let mut summary = FetchSummary::default();
        let mut cursor: Option<String> = None;

        loop {
            let remaining = limit.map(|n| n.saturating_sub(summary.products));
            if remaining == Some(0) {
                break;
            }
            let first = remaining.map_or(self.settings.page_size, |r| {
                self.settings
                    .page_size
                    .min(u32::try_from(r).unwrap_or(u32::MAX))
            });

            let page_number = tracker.begin_page()?;
            let page = self
                .fetch_products_page(filters, cursor.as_deref(), first)
                .await?;

            let mut products = Vec::with_capacity(page.products.len());
            for product in page.products {
                if !seen.insert(product.id.clone()) {
                    tracing::warn!(id = %product.id, "duplicate product in page, skipping");
                    continue;
                }
                products.push(product);
            }
            if let Some(r) = remaining {
                products.truncate(r);
            }

            for product in &mut products {
                self.complete_variants(product).await?;
            }

            summary.pages = page_number;
            summary.products += products.len();
            summary.variants += products.iter().map(|p| p.variants.edges.len()).sum::<usize>();
            tracing::info!(
                page = page_number,
                products = summary.products,
                variants = summary.variants,
                "fetched product page"
            );

            if !products.is_empty() {
                on_page(products)?;
            }

            match tracker.advance(&page.page_info)? {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(summary)
    }

    /// Collects every product matching `filters` into memory.
    ///
    /// # Errors
    ///
    /// See [`ShopifyClient::fetch_products`].
    pub async fn fetch_all_products(
        &self,
        filters: &ProductFilters,
        limit: Option<u32>,
    ) -> Result<Vec<Product>, ClientError> {
        let mut all = Vec::new();
        self.fetch_products(filters, limit, |page| {
            all.extend(page);
            Ok::<(), ClientError>(())
        })
        .await?;
        Ok(all)
    }

    /// Appends the variants that did not fit in the inline connection.
    async fn complete_variants(&self, product: &mut Product) -> Result<(), ClientError> {
        let mut tracker = CursorTracker::new(PRODUCT_VARIANTS.name, MAX_PAGES);
        let mut cursor = tracker.advance(&product.variants.page_info)?;

        while let Some(after) = cursor {
            tracker.begin_page()?;
            let data: ProductVariantsData = self
                .execute(
                    &PRODUCT_VARIANTS,
                    json!({ "id": product.id, "first": LOOKUP_PAGE_SIZE, "after": after }),
                )
                .await?;
            let Some(holder) = data.product else {
                tracing::warn!(id = %product.id, "product disappeared while fetching variants");
                return Err(ClientError::MissingData {
                    operation: PRODUCT_VARIANTS.name.to_owned(),
                });
            };
            product.variants.edges.extend(holder.variants.edges);
            product.variants.page_info = holder.variants.page_info;
            cursor = tracker.advance(&product.variants.page_info)?;
        }

        if tracker.pages() > 0 {
            tracing::debug!(
                id = %product.id,
                variants = product.variants.edges.len(),
                "fetched remaining variants"
            );
        }
        Ok(())
    }
}
