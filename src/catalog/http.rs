//! REST client for the storefront stock and product endpoints.
//!
//! Thin HTTP wrapper for `GET /stock/{id}` and `GET /products/{id}`. Body
//! parsing lives in pure functions for testability.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::{CatalogError, ProductService, Stock, StockService};
use crate::cart::{ProductId, ProductRecord};
use crate::config::HttpTimeouts;

// =============================================================================
// CLIENT
// =============================================================================

#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Build a client rooted at `base_url` (trailing `/` is ignored).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, timeouts: HttpTimeouts) -> Result<Self, CatalogError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| CatalogError::ClientBuild(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_text(&self, url: String) -> Result<String, CatalogError> {
        debug!(%url, "catalog request");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status { status: status.as_u16(), url });
        }

        response
            .text()
            .await
            .map_err(|e| CatalogError::Request(e.to_string()))
    }
}

#[async_trait::async_trait]
impl StockService for HttpCatalog {
    async fn stock(&self, product_id: ProductId) -> Result<Stock, CatalogError> {
        let text = self.get_text(stock_url(&self.base_url, product_id)).await?;
        parse_stock(product_id, &text)
    }
}

#[async_trait::async_trait]
impl ProductService for HttpCatalog {
    async fn product(&self, product_id: ProductId) -> Result<ProductRecord, CatalogError> {
        let text = self.get_text(product_url(&self.base_url, product_id)).await?;
        parse_product(product_id, &text)
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

fn stock_url(base_url: &str, product_id: ProductId) -> String {
    format!("{base_url}/stock/{product_id}")
}

fn product_url(base_url: &str, product_id: ProductId) -> String {
    format!("{base_url}/products/{product_id}")
}

// =============================================================================
// PARSING
// =============================================================================

#[derive(Deserialize)]
struct StockBody {
    id: Option<ProductId>,
    amount: u32,
}

fn parse_stock(product_id: ProductId, json: &str) -> Result<Stock, CatalogError> {
    let body: StockBody = serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
    check_id(product_id, body.id)?;
    Ok(Stock { id: product_id, amount: body.amount })
}

fn parse_product(product_id: ProductId, json: &str) -> Result<ProductRecord, CatalogError> {
    let record: ProductRecord = serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
    check_id(product_id, Some(record.id))?;
    Ok(record)
}

fn check_id(requested: ProductId, returned: Option<ProductId>) -> Result<(), CatalogError> {
    match returned {
        Some(id) if id != requested => {
            Err(CatalogError::Parse(format!("asked for product {requested}, got {id}")))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
