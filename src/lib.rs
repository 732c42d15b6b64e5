//! # cartstore
//!
//! Storefront shopping-cart state container. Tracks line items and
//! quantities, validates every quantity change against a remote stock API,
//! and persists the full cart to a key-value store after each successful
//! mutation.
//!
//! The cart logic lives in [`cart`]; the collaborators it depends on
//! ([`catalog`], [`notify`], [`storage`]) are traits so the store can run
//! against HTTP and a JSON file in the `cart` binary, or against in-memory
//! fakes in tests.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod notify;
pub mod storage;

pub use cart::error::CartError;
pub use cart::store::{CartServices, CartStore, Change};
pub use cart::{Cart, CartItem, ProductRecord};
