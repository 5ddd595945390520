//! GraphQL documents sent to the Shopify Admin API.
//!
//! Every document is a named operation; caller-supplied values (cursors,
//! search queries, ids) are passed as variables and never interpolated into
//! the document text.

use serde::Serialize;

/// Number of variants requested inline with each product. Products with more
/// variants get the remainder through [`PRODUCT_VARIANTS`].
pub const INLINE_VARIANTS: u32 = 20;

/// Page size for follow-up variant and lookup queries.
pub const LOOKUP_PAGE_SIZE: u32 = 250;

/// A named GraphQL operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

/// JSON body of a GraphQL POST request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub operation_name: &'a str,
    pub variables: serde_json::Value,
}

impl<'a> GraphQlRequest<'a> {
    #[must_use]
    pub fn new(operation: &'a Operation, variables: serde_json::Value) -> Self {
        Self {
            query: operation.document,
            operation_name: operation.name,
            variables,
        }
    }
}

pub const SHOP_INFO: Operation = Operation {
    name: "ShopInfo",
    document: r"query ShopInfo {
  shop {
    name
    currencyCode
    plan { displayName }
  }
}",
};

pub const PRODUCT_VENDORS: Operation = Operation {
    name: "ProductVendors",
    document: r"query ProductVendors($first: Int!, $after: String) {
  products(first: $first, after: $after) {
    pageInfo { hasNextPage endCursor }
    edges { node { vendor } }
  }
}",
};

pub const PRODUCT_TAGS: Operation = Operation {
    name: "ProductTags",
    document: r"query ProductTags($first: Int!, $after: String) {
  shop {
    productTags(first: $first, after: $after) {
      pageInfo { hasNextPage endCursor }
      edges { node }
    }
  }
}",
};

pub const PUBLICATIONS: Operation = Operation {
    name: "Publications",
    document: r"query Publications {
  publications(first: 25) {
    pageInfo { hasNextPage endCursor }
    edges { node { id name } }
  }
}",
};

pub const PRODUCTS_COUNT: Operation = Operation {
    name: "ProductsCount",
    document: r"query ProductsCount($query: String) {
  productsCount(query: $query) {
    count
    precision
  }
}",
};

pub const PRODUCTS_PAGE: Operation = Operation {
    name: "ProductsPage",
    document: r"query ProductsPage(
  $first: Int!
  $after: String
  $query: String
  $sortKey: ProductSortKeys!
  $reverse: Boolean!
  $variantsFirst: Int!
) {
  products(first: $first, after: $after, query: $query, sortKey: $sortKey, reverse: $reverse) {
    pageInfo { hasNextPage endCursor }
    edges {
      node {
        id
        title
        handle
        status
        vendor
        productType
        tags
        createdAt
        updatedAt
        publishedAt
        totalInventory
        mediaCount { count }
        resourcePublications(first: 10) {
          edges {
            node {
              isPublished
              publication { id name }
            }
          }
        }
        variants(first: $variantsFirst) {
          pageInfo { hasNextPage endCursor }
          edges { node { ...VariantFields } }
        }
      }
    }
  }
}

fragment VariantFields on ProductVariant {
  id
  sku
  barcode
  price
  compareAtPrice
  inventoryQuantity
  inventoryPolicy
  inventoryItem {
    tracked
    requiresShipping
    measurement {
      weight { value unit }
    }
  }
  selectedOptions { name value }
}",
};

pub const PRODUCT_VARIANTS: Operation = Operation {
    name: "ProductVariants",
    document: r"query ProductVariants($id: ID!, $first: Int!, $after: String) {
  product(id: $id) {
    variants(first: $first, after: $after) {
      pageInfo { hasNextPage endCursor }
      edges {
        node {
          id
          sku
          barcode
          price
          compareAtPrice
          inventoryQuantity
          inventoryPolicy
          inventoryItem {
            tracked
            requiresShipping
            measurement {
              weight { value unit }
            }
          }
          selectedOptions { name value }
        }
      }
    }
  }
}",
};
