//! Cart operation errors and the messages users see for them.

use super::ProductId;
use crate::catalog::CatalogError;
use crate::storage::StorageError;

pub const STOCK_EXCEEDED_MESSAGE: &str = "Requested quantity is out of stock";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add product";
pub const REMOVE_FAILED_MESSAGE: &str = "Failed to remove product";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update product amount";

/// Which cart operation an error came from. Picks the generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    #[must_use]
    pub fn failed_message(self) -> &'static str {
        match self {
            Self::Add => ADD_FAILED_MESSAGE,
            Self::Remove => REMOVE_FAILED_MESSAGE,
            Self::Update => UPDATE_FAILED_MESSAGE,
        }
    }
}

/// Why a cart operation did not commit.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The requested amount is above what the stock service reports.
    #[error("product {product_id}: requested {requested}, only {available} in stock")]
    StockExceeded { product_id: ProductId, requested: u64, available: u32 },

    /// The product is not in the cart.
    #[error("product {product_id} is not in the cart")]
    NotFound { product_id: ProductId },

    /// A stock or product lookup failed.
    #[error(transparent)]
    Transport(#[from] CatalogError),

    /// The new cart could not be written to storage.
    #[error("cart persist failed: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// Message shown to the user for this error during `op`.
    ///
    /// Only stock problems get a specific message; everything else collapses
    /// into the operation's generic failure text.
    #[must_use]
    pub fn user_message(&self, op: Operation) -> &'static str {
        match self {
            Self::StockExceeded { .. } => STOCK_EXCEEDED_MESSAGE,
            Self::NotFound { .. } | Self::Transport(_) | Self::Storage(_) => op.failed_message(),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
