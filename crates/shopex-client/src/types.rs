//! Shopify Admin GraphQL response types.
//!
//! Field names follow the schema (`camelCase` on the wire). Nullable schema
//! fields are modelled as `Option` or defaulted, since stores routinely leave
//! `sku`, `barcode` and `compareAtPrice` unset.
//!
//! ### `price` / `compareAtPrice`
//! `Money` scalars arrive as decimal strings (e.g. `"19.99"`). They are kept
//! as strings here and converted to numeric cells at export time.
//!
//! ### `inventoryItem.measurement.weight`
//! Absent for digital products and for stores that never set a weight.

use serde::Deserialize;

/// Envelope shared by every GraphQL response.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
    #[serde(default)]
    pub extensions: Option<ResponseExtensions>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

impl GraphQlError {
    /// The machine-readable `extensions.code`, e.g. `"THROTTLED"`.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.extensions.as_ref()?.code.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseExtensions {
    #[serde(default)]
    pub cost: Option<QueryCost>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryCost {
    #[serde(default)]
    pub requested_query_cost: Option<f64>,
    #[serde(default)]
    pub actual_query_cost: Option<f64>,
    #[serde(default)]
    pub throttle_status: Option<ThrottleStatus>,
}

/// Leaky-bucket state reported after each query.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrottleStatus {
    pub maximum_available: f64,
    pub currently_available: f64,
    pub restore_rate: f64,
}

/// A cursor-paginated connection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    /// Absent when the selection does not request `pageInfo`.
    #[serde(default)]
    pub page_info: PageInfo,
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    /// Consumes the connection, returning its nodes in order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopInfo {
    pub name: String,
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub plan: Option<ShopPlan>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopPlan {
    pub display_name: String,
}

/// A sales channel.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Publication {
    /// Publication GID, e.g. `gid://shopify/Publication/1`.
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePublication {
    pub is_published: bool,
    pub publication: Publication,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Count {
    pub count: u64,
    /// `EXACT` or `AT_LEAST`.
    #[serde(default)]
    pub precision: Option<String>,
}

/// A product with its first page of variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product GID, e.g. `gid://shopify/Product/123`.
    pub id: String,
    pub title: String,
    pub handle: String,
    /// `ACTIVE`, `DRAFT` or `ARCHIVED`.
    pub status: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    /// `null` while the product is unpublished from the online store.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub total_inventory: Option<i64>,
    #[serde(default)]
    pub media_count: Option<Count>,
    #[serde(default)]
    pub resource_publications: Option<Connection<ResourcePublication>>,
    pub variants: Connection<Variant>,
}

impl Product {
    /// Names of the sales channels this product is currently published to.
    #[must_use]
    pub fn published_channel_names(&self) -> Vec<&str> {
        self.resource_publications
            .iter()
            .flat_map(|conn| conn.edges.iter())
            .filter(|edge| edge.node.is_published)
            .map(|edge| edge.node.publication.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn image_count(&self) -> u64 {
        self.media_count.as_ref().map_or(0, |c| c.count)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// Variant GID, e.g. `gid://shopify/ProductVariant/456`.
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    pub price: String,
    #[serde(default)]
    pub compare_at_price: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    /// `DENY` or `CONTINUE`.
    #[serde(default)]
    pub inventory_policy: String,
    #[serde(default)]
    pub inventory_item: Option<InventoryItem>,
    #[serde(default)]
    pub selected_options: Vec<SelectedOption>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default)]
    pub tracked: bool,
    #[serde(default)]
    pub requires_shipping: Option<bool>,
    #[serde(default)]
    pub measurement: Option<Measurement>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Measurement {
    #[serde(default)]
    pub weight: Option<Weight>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Weight {
    pub value: f64,
    /// `GRAMS`, `KILOGRAMS`, `OUNCES` or `POUNDS`.
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

// Per-operation `data` payloads.

#[derive(Debug, Deserialize)]
pub(crate) struct ShopData {
    pub shop: ShopInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VendorNode {
    #[serde(default)]
    pub vendor: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VendorsData {
    pub products: Connection<VendorNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TagsShop {
    pub product_tags: Connection<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TagsData {
    pub shop: TagsShop,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PublicationsData {
    pub publications: Connection<Publication>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CountData {
    pub products_count: Count,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductsData {
    pub products: Connection<Product>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VariantsHolder {
    pub variants: Connection<Variant>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProductVariantsData {
    pub product: Option<VariantsHolder>,
}
