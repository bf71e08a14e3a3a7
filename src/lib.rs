//! # dish-cart
//!
//! Client library for a food-ordering storefront's REST API.
//! Lists dishes, categories and modifiers, keeps a signed-in user's cart in
//! step with the server, places orders and lists them for staff.
//!
//! ## Cart model
//!
//! | Piece | Where | What it guarantees |
//! |-------|-------|--------------------|
//! | Line total | [`pricing::line_total`] | `(price + modifiers) * quantity`, two places |
//! | Cart total | [`pricing::cart_total`] | sum of line totals, never cached |
//! | Modifier toggle | [`cart::apply_modifier_toggle`] | set semantics, no duplicates |
//! | Sync | [`cart::CartController`] | re-fetch after every mutation, no optimistic edits |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dish_cart::{CartController, CheckoutForm, Session, StoreApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = StoreApi::new("http://localhost:4000");
//!     let mut cart = CartController::new(api, Session::with_token("<token>"));
//!     cart.open().await?;
//!
//!     if let Some(item) = cart.cart().items.first().map(|i| i.id.clone()) {
//!         cart.set_quantity(&item, "2").await?;
//!     }
//!     println!("Total: {}", cart.total());
//!
//!     let mut form = CheckoutForm::new();
//!     form.full_name = "Asha Rao".into();
//!     // ... remaining delivery fields
//!     cart.checkout(&mut form).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! cargo run -- sign-in --email asha@example.com --password '...'
//! cargo run -- dishes --sort asc
//! cargo run -- cart show
//! cargo run -- cart quantity <item_id> 3
//! cargo run -- cart modifier <item_id> <modifier_id> --off
//! cargo run -- cart checkout --full-name "Asha Rao" --mobile 98765 \
//!     --address "12 MG Road" --city Pune --state MH --pincode 411001
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod session;
pub mod storage;
pub mod utils;

pub use api::StoreApi;
pub use cart::{CartApi, CartController, CheckoutForm};
pub use catalog::SortOrder;
pub use config::Config;
pub use error::StoreError;
pub use models::{Cart, Category, Dish, LineItem, Modifier, Order, OrderStatus};
pub use pricing::{cart_total, line_total, Money};
pub use session::Session;
