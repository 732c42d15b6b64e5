//! Cart store — stock-validated mutations with persist-on-write.
//!
//! DESIGN
//! ======
//! `CartStore` owns the current cart and the collaborators it needs. Every
//! mutation follows the same shape: snapshot the cart, run the async stock
//! (and product) lookups, build the next cart as a copy, then commit. The
//! commit writes storage first and only then swaps the in-memory snapshot,
//! so a failed write leaves memory and storage agreeing on the old cart.
//!
//! CONCURRENCY
//! ===========
//! Mutations hold a single async writer lock from snapshot to commit. Two
//! overlapping `add_product` calls for one product therefore add up rather
//! than the later commit overwriting the earlier one. Readers go through the
//! `watch` channel and never wait on the writer.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as `CartError` values and are also pushed to the
//! notifier once, with the user-facing message for the failing operation.
//! The underlying cause is logged, never shown.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::{debug, warn};

use super::error::{CartError, Operation};
use super::{Cart, CartItem, ProductId, codec};
use crate::catalog::{CatalogError, ProductService, Stock, StockService};
use crate::notify::Notifier;
use crate::storage::PersistentStore;

/// Collaborators injected into a [`CartStore`].
#[derive(Clone)]
pub struct CartServices {
    pub stock: Arc<dyn StockService>,
    pub products: Arc<dyn ProductService>,
    pub notifier: Arc<dyn Notifier>,
    pub storage: Arc<dyn PersistentStore>,
}

/// Whether an operation changed the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Committed,
    Unchanged,
}

pub struct CartStore {
    services: CartServices,
    key: String,
    writer: Mutex<()>,
    snapshot: watch::Sender<Cart>,
}

impl CartStore {
    /// Open the store, loading whatever cart is stored under `key`.
    ///
    /// Never fails: a missing, unreadable or malformed stored cart opens as
    /// empty (or sanitized) and is logged.
    #[must_use]
    pub fn open(services: CartServices, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = codec::load(services.storage.as_ref(), &key);
        debug!(%key, items = cart.len(), "cart store opened");
        let (snapshot, _) = watch::channel(cart);
        Self { services, key, writer: Mutex::new(()), snapshot }
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current cart snapshot.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.snapshot.borrow().clone()
    }

    /// Receiver that observes every committed cart. Closes when the store drops.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.snapshot.subscribe()
    }

    /// Add one unit of `product_id`, fetching product details for new lines.
    ///
    /// # Errors
    ///
    /// `StockExceeded` if one more unit is above stock, `Transport` if a
    /// lookup fails, `Storage` if the commit cannot be persisted.
    pub async fn add_product(&self, product_id: ProductId) -> Result<Change, CartError> {
        let _writer = self.writer.lock().await;
        debug!(product_id, "add product");
        let result = self.try_add(product_id).await;
        self.report(Operation::Add, product_id, result)
    }

    /// Remove the line for `product_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` if the product is not in the cart, `Storage` if the commit
    /// cannot be persisted.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<Change, CartError> {
        let _writer = self.writer.lock().await;
        debug!(product_id, "remove product");
        let result = self.try_remove(product_id);
        self.report(Operation::Remove, product_id, result)
    }

    /// Set the amount for `product_id`.
    ///
    /// `amount <= 0` is ignored without a lookup or a notification and
    /// returns `Change::Unchanged`.
    ///
    /// # Errors
    ///
    /// `StockExceeded` if `amount` is above stock, `NotFound` if the product
    /// is not in the cart, `Transport` if the stock lookup fails, `Storage`
    /// if the commit cannot be persisted.
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) -> Result<Change, CartError> {
        if amount <= 0 {
            debug!(product_id, amount, "ignoring non-positive amount");
            return Ok(Change::Unchanged);
        }
        let _writer = self.writer.lock().await;
        debug!(product_id, amount, "update product amount");
        let result = self.try_update(product_id, amount.unsigned_abs()).await;
        self.report(Operation::Update, product_id, result)
    }

    // =========================================================================
    // OPERATIONS
    // =========================================================================

    async fn try_add(&self, product_id: ProductId) -> Result<Change, CartError> {
        let current = self.cart();
        let existing = current.get(product_id).map(|item| item.amount);

        let stock = self.services.stock.stock(product_id).await?;
        let requested = u64::from(existing.unwrap_or(0)) + 1;
        let target = within_stock(product_id, requested, stock)?;

        let next = if existing.is_some() {
            current
                .with_amount(product_id, target)
                .ok_or(CartError::NotFound { product_id })?
        } else {
            let product = self.services.products.product(product_id).await?;
            if product.id != product_id {
                return Err(CatalogError::Parse(format!("asked for product {product_id}, got {}", product.id)).into());
            }
            current.with_item(CartItem::from_product(product))
        };

        self.commit(next)
    }

    fn try_remove(&self, product_id: ProductId) -> Result<Change, CartError> {
        let next = self
            .cart()
            .without(product_id)
            .ok_or(CartError::NotFound { product_id })?;
        self.commit(next)
    }

    async fn try_update(&self, product_id: ProductId, requested: u64) -> Result<Change, CartError> {
        let stock = self.services.stock.stock(product_id).await?;
        let target = within_stock(product_id, requested, stock)?;

        let next = self
            .cart()
            .with_amount(product_id, target)
            .ok_or(CartError::NotFound { product_id })?;
        self.commit(next)
    }

    // =========================================================================
    // COMMIT / REPORT
    // =========================================================================

    fn commit(&self, next: Cart) -> Result<Change, CartError> {
        codec::save(self.services.storage.as_ref(), &self.key, &next)?;
        debug!(items = next.len(), units = next.total_units(), "cart committed");
        self.snapshot.send_replace(next);
        Ok(Change::Committed)
    }

    fn report(
        &self,
        op: Operation,
        product_id: ProductId,
        result: Result<Change, CartError>,
    ) -> Result<Change, CartError> {
        if let Err(e) = &result {
            warn!(?op, product_id, error = %e, "cart operation rejected");
            self.services.notifier.error(e.user_message(op));
        }
        result
    }
}

/// Check `requested` against `stock`, returning it as a cart amount.
fn within_stock(product_id: ProductId, requested: u64, stock: Stock) -> Result<u32, CartError> {
    match u32::try_from(requested) {
        Ok(amount) if amount <= stock.amount => Ok(amount),
        _ => Err(CartError::StockExceeded { product_id, requested, available: stock.amount }),
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
