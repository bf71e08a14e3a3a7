use tracing::{debug, info, warn};

use super::checkout::{CheckoutForm, DeliveryDetails};
use super::modifiers::{apply_modifier_toggle, dedup_modifier_ids};
use super::CartApi;
use crate::error::{Result, StoreError};
use crate::models::{
    AddItemRequest, Cart, CartSummary, CheckoutItem, CheckoutRequest, LineItem, Modifier,
    UpdateItemRequest,
};
use crate::pricing::{parse_quantity, Money};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartAction {
    Load,
    Refresh,
    AddItem,
    UpdateQuantity,
    ToggleModifier,
    RemoveItem,
    Checkout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Submitting(CartAction),
}

enum Mutation<'a> {
    Add(&'a AddItemRequest),
    Update(CartAction, &'a str, &'a UpdateItemRequest),
    Delete(&'a str),
}

impl Mutation<'_> {
    fn action(&self) -> CartAction {
        match self {
            Mutation::Add(_) => CartAction::AddItem,
            Mutation::Update(action, _, _) => *action,
            Mutation::Delete(_) => CartAction::RemoveItem,
        }
    }
}

/// Keeps a local copy of the signed-in user's cart in step with the server.
///
/// Every mutation sends the full desired state of one line item, then
/// re-fetches the whole cart and replaces the local copy. Nothing is patched
/// optimistically: when a request fails the local cart is left exactly as it
/// was and the error is returned. Mutations take `&mut self`, so a controller
/// never has two requests in flight.
pub struct CartController<A: CartApi> {
    api: A,
    session: Session,
    cart: Cart,
    modifiers: Vec<Modifier>,
    phase: SyncPhase,
}

impl<A: CartApi> CartController<A> {
    pub fn new(api: A, session: Session) -> Self {
        Self {
            api,
            session,
            cart: Cart::default(),
            modifiers: Vec::new(),
            phase: SyncPhase::Idle,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Modifier catalog offered for toggling. Empty if it could not be fetched.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    /// Loads the cart and the modifier catalog.
    ///
    /// A failed cart fetch is an error; a failed modifier fetch only leaves
    /// the catalog empty.
    pub async fn open(&mut self) -> Result<()> {
        let token = self.session.require_token()?.to_string();
        self.reload(&token, CartAction::Load).await?;

        match self.api.fetch_modifiers(&token).await {
            Ok(modifiers) => {
                debug!(count = modifiers.len(), "modifier catalog loaded");
                self.modifiers = modifiers;
            }
            Err(e) => {
                warn!(error = %e, "modifier catalog unavailable");
                self.modifiers.clear();
            }
        }
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<()> {
        let token = self.session.require_token()?.to_string();
        self.reload(&token, CartAction::Refresh).await
    }

    pub async fn add_item(
        &mut self,
        dish_id: &str,
        modifier_ids: &[String],
        quantity: u32,
    ) -> Result<()> {
        if dish_id.trim().is_empty() {
            return Err(StoreError::validation("A dish is required"));
        }
        let request = AddItemRequest {
            dish_id: dish_id.trim().to_string(),
            modifier_ids: dedup_modifier_ids(modifier_ids.iter().cloned()),
            quantity: quantity.max(1),
        };
        self.submit(Mutation::Add(&request)).await
    }

    /// Quantity straight from a text input; see [`parse_quantity`].
    pub async fn set_quantity(&mut self, item_id: &str, raw: &str) -> Result<()> {
        self.update_quantity(item_id, parse_quantity(raw)).await
    }

    pub async fn update_quantity(&mut self, item_id: &str, quantity: u32) -> Result<()> {
        let item = self.line_item(item_id)?;
        let request = UpdateItemRequest {
            quantity: quantity.max(1),
            modifier_ids: dedup_modifier_ids(item.modifier_ids()),
        };
        self.submit(Mutation::Update(CartAction::UpdateQuantity, item_id, &request))
            .await
    }

    pub async fn toggle_modifier(
        &mut self,
        item_id: &str,
        modifier_id: &str,
        checked: bool,
    ) -> Result<()> {
        let item = self.line_item(item_id)?;
        let modifier_ids = apply_modifier_toggle(item, modifier_id, checked);
        if modifier_ids == item.modifier_ids() {
            debug!(item_id, modifier_id, checked, "modifier selection unchanged");
            return Ok(());
        }
        let request = UpdateItemRequest {
            quantity: item.quantity.max(1),
            modifier_ids,
        };
        self.submit(Mutation::Update(CartAction::ToggleModifier, item_id, &request))
            .await
    }

    pub async fn remove_item(&mut self, item_id: &str) -> Result<()> {
        self.line_item(item_id)?;
        self.submit(Mutation::Delete(item_id)).await
    }

    /// Places an order for everything in the cart.
    ///
    /// On success the local cart is emptied and `form` is reset; on failure
    /// both are left untouched so the user can retry. Returns the total that
    /// was submitted.
    pub async fn checkout(&mut self, form: &mut CheckoutForm) -> Result<Money> {
        let details = form.validate()?;
        if self.cart.is_empty() {
            return Err(StoreError::validation("Your cart is empty"));
        }
        let token = self.session.require_token()?.to_string();

        let total = self.cart.total();
        let request = checkout_request(&self.cart, &details)?;

        self.phase = SyncPhase::Submitting(CartAction::Checkout);
        let outcome = self.api.checkout(&token, &request).await;
        self.phase = SyncPhase::Idle;

        match outcome {
            Ok(()) => {
                info!(items = request.items.len(), total = %total, "order placed");
                self.cart.clear();
                form.reset();
                Ok(total)
            }
            Err(e) => {
                warn!(error = %e, "checkout failed");
                Err(e)
            }
        }
    }

    fn line_item(&self, item_id: &str) -> Result<&LineItem> {
        self.cart
            .find(item_id)
            .ok_or_else(|| StoreError::validation(format!("No cart item with id {}", item_id)))
    }

    async fn reload(&mut self, token: &str, action: CartAction) -> Result<()> {
        self.phase = SyncPhase::Submitting(action);
        let fetched = self.api.fetch_cart(token).await;
        self.phase = SyncPhase::Idle;

        let cart = fetched?;
        debug!(items = cart.len(), total = %cart.total(), "cart fetched");
        self.cart = cart;
        Ok(())
    }

    async fn submit(&mut self, mutation: Mutation<'_>) -> Result<()> {
        let token = self.session.require_token()?.to_string();
        let action = mutation.action();

        self.phase = SyncPhase::Submitting(action);
        debug!(?action, "submitting cart mutation");

        let sent = match mutation {
            Mutation::Add(request) => self.api.add_item(&token, request).await,
            Mutation::Update(_, item_id, request) => {
                self.api.update_item(&token, item_id, request).await
            }
            Mutation::Delete(item_id) => self.api.delete_item(&token, item_id).await,
        };
        let outcome = match sent {
            Ok(()) => self.api.fetch_cart(&token).await,
            Err(e) => Err(e),
        };
        self.phase = SyncPhase::Idle;

        match outcome {
            Ok(cart) => {
                info!(?action, items = cart.len(), total = %cart.total(), "cart synchronized");
                self.cart = cart;
                Ok(())
            }
            Err(e) => {
                warn!(?action, error = %e, "cart mutation failed");
                Err(e)
            }
        }
    }
}

/// Snapshot of the cart as the checkout endpoint expects it.
///
/// Every line item must still reference a dish.
pub fn checkout_request(cart: &Cart, details: &DeliveryDetails) -> Result<CheckoutRequest> {
    let orphans: Vec<&str> = cart
        .items
        .iter()
        .filter(|item| item.dish.is_none())
        .map(|item| item.id.as_str())
        .collect();
    if !orphans.is_empty() {
        return Err(StoreError::validation(format!(
            "Some cart items no longer have a dish, remove them first: {}",
            orphans.join(", ")
        )));
    }

    let items = cart
        .items
        .iter()
        .filter_map(|item| {
            item.dish.as_ref().map(|dish| CheckoutItem {
                dish: dish.id.clone(),
                quantity: item.quantity.max(1),
                modifiers: dedup_modifier_ids(item.modifier_ids()),
            })
        })
        .collect();
    Ok(CheckoutRequest {
        items,
        total_amount: cart.total().amount(),
        full_name: details.full_name.clone(),
        address: details.address.clone(),
        mobile: details.mobile.clone(),
        street: details.address.clone(),
        city: details.city.clone(),
        state: details.state.clone(),
        pincode: details.pincode.clone(),
    })
}
