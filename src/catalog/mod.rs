//! Stock and product lookups.
//!
//! DESIGN
//! ======
//! Both lookups are async traits so `CartStore` can hold them as
//! `Arc<dyn ...>` and tests can swap in fakes. [`http::HttpCatalog`]
//! implements both against the storefront REST API.

pub mod http;

pub use http::HttpCatalog;

use serde::{Deserialize, Serialize};

use crate::cart::{ProductId, ProductRecord};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by stock/product lookups.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The request could not be sent or the body could not be read.
    #[error("catalog request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status.
    #[error("catalog response error: status {status} from {url}")]
    Status { status: u16, url: String },

    /// The response body did not have the expected shape.
    #[error("catalog response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Stock level for one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

// =============================================================================
// SERVICES
// =============================================================================

#[async_trait::async_trait]
pub trait StockService: Send + Sync {
    /// Available quantity for `product_id`.
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CatalogError>;
}

#[async_trait::async_trait]
pub trait ProductService: Send + Sync {
    /// Full product record for `product_id`.
    async fn product(&self, product_id: ProductId) -> Result<ProductRecord, CatalogError>;
}
