use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AddItemRequest, Cart, CheckoutRequest, Modifier, UpdateItemRequest};

pub mod checkout;
pub mod controller;
pub mod modifiers;

pub use checkout::{CheckoutForm, DeliveryDetails};
pub use controller::{CartAction, CartController, SyncPhase};
pub use modifiers::{apply_modifier_toggle, dedup_modifier_ids};

/// The remote cart endpoints the controller talks to.
///
/// Every call takes the session token explicitly; implementations never
/// look one up on their own.
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn fetch_cart(&self, token: &str) -> Result<Cart>;

    async fn fetch_modifiers(&self, token: &str) -> Result<Vec<Modifier>>;

    async fn add_item(&self, token: &str, request: &AddItemRequest) -> Result<()>;

    async fn update_item(
        &self,
        token: &str,
        item_id: &str,
        request: &UpdateItemRequest,
    ) -> Result<()>;

    async fn delete_item(&self, token: &str, item_id: &str) -> Result<()>;

    async fn checkout(&self, token: &str, request: &CheckoutRequest) -> Result<()>;
}
