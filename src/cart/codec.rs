//! Persisted form of the cart.
//!
//! DESIGN
//! ======
//! The cart is stored as a bare JSON array of line items. Loading never
//! fails: storage errors and unparsable documents fall back to an empty
//! cart, and individual bad lines (undecodable, zero amount, repeated id)
//! are dropped so one damaged entry does not cost the user the whole cart.

use serde_json::Value;
use tracing::warn;

use super::{Cart, CartItem};
use crate::storage::{PersistentStore, StorageError};

/// Serialize `cart` to its stored JSON form.
///
/// # Errors
///
/// Returns an error if a line's details cannot be encoded.
pub fn encode(cart: &Cart) -> Result<String, StorageError> {
    Ok(serde_json::to_string(cart)?)
}

/// Outcome of decoding a stored cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub cart: Cart,
    /// Lines present in the document that did not make it into `cart`.
    pub dropped: usize,
}

/// Decode a stored cart, sanitizing as described in the module docs.
#[must_use]
pub fn decode(raw: &str) -> Decoded {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            warn!(kind = json_kind(&other), "stored cart is not an array; starting empty");
            return Decoded { cart: Cart::new(), dropped: 0 };
        }
        Err(e) => {
            warn!(error = %e, "stored cart is not valid JSON; starting empty");
            return Decoded { cart: Cart::new(), dropped: 0 };
        }
    };

    let total = entries.len();
    let items: Vec<CartItem> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<CartItem>(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "dropping undecodable cart line");
                None
            }
        })
        .collect();

    let cart = Cart::from_items(items);
    let dropped = total - cart.len();
    if dropped > 0 {
        warn!(dropped, kept = cart.len(), "stored cart sanitized on load");
    }
    Decoded { cart, dropped }
}

/// Read the cart stored under `key`. Absent or unreadable → empty cart.
pub fn load(store: &dyn PersistentStore, key: &str) -> Cart {
    match store.get(key) {
        Ok(Some(raw)) => decode(&raw).cart,
        Ok(None) => Cart::new(),
        Err(e) => {
            warn!(error = %e, key, "cart storage read failed; starting empty");
            Cart::new()
        }
    }
}

/// Write `cart` under `key`.
///
/// # Errors
///
/// Returns an error if encoding or the storage write fails.
pub fn save(store: &dyn PersistentStore, key: &str, cart: &Cart) -> Result<(), StorageError> {
    let raw = encode(cart)?;
    store.set(key, &raw)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "codec_test.rs"]
mod tests;
