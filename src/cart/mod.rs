//! Cart value types.
//!
//! DESIGN
//! ======
//! `Cart` is a plain ordered value: mutations happen on a clone inside
//! [`store::CartStore`] and are swapped in whole at commit time, so readers
//! holding an older snapshot never observe a half-applied change.
//!
//! Product records are open-ended JSON objects. Everything except `id` and
//! `amount` is carried through verbatim in `details`.

pub mod codec;
pub mod error;
pub mod store;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product identifier as used by the stock and product endpoints.
pub type ProductId = u64;

// =============================================================================
// PRODUCT RECORD
// =============================================================================

/// Product details as returned by the product service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    /// Remaining fields (title, price, image, ...), kept as-is.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

// =============================================================================
// CART ITEM
// =============================================================================

/// One line of the cart: a product plus the quantity the user wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub amount: u32,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl CartItem {
    /// Build a fresh line from a product record with `amount = 1`.
    ///
    /// A stray `amount` key in the record is dropped; the cart owns that field.
    #[must_use]
    pub fn from_product(product: ProductRecord) -> Self {
        let mut details = product.details;
        details.remove("amount");
        Self { id: product.id, amount: 1, details }
    }

    /// Unit price, if the product record carried a numeric `price`.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.details.get("price").and_then(Value::as_f64)
    }
}

// =============================================================================
// CART
// =============================================================================

/// Ordered, id-unique collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from items, keeping the first occurrence of each id and
    /// dropping lines whose amount is zero.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.amount == 0 || cart.contains(item.id) {
                continue;
            }
            cart.items.push(item);
        }
        cart
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CartItem> {
        self.items.iter()
    }

    /// Sum of all line amounts.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of `price * amount`. Lines without a numeric price count as zero.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .filter_map(|item| item.price().map(|price| price * f64::from(item.amount)))
            .sum()
    }

    /// Copy of this cart with `id` set to `amount`. `None` if `id` is absent.
    pub(crate) fn with_amount(&self, id: ProductId, amount: u32) -> Option<Self> {
        let mut next = self.clone();
        let item = next.items.iter_mut().find(|item| item.id == id)?;
        item.amount = amount;
        Some(next)
    }

    /// Copy of this cart with `item` appended. Callers check the id is new.
    pub(crate) fn with_item(&self, item: CartItem) -> Self {
        let mut next = self.clone();
        next.items.push(item);
        next
    }

    /// Copy of this cart without `id`. `None` if `id` is absent.
    pub(crate) fn without(&self, id: ProductId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }
        let items = self.items.iter().filter(|item| item.id != id).cloned().collect();
        Some(Self { items })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
