pub mod cart;
pub mod dish;
pub mod order;
pub mod request;

pub use cart::{Cart, CartSummary, LineItem, LineSummary};
pub use dish::{Category, Dish, Modifier};
pub use order::{Order, OrderItem, OrderStatus};
pub use request::{
    AddItemRequest, CheckoutItem, CheckoutRequest, SignInRequest, SignInResponse, SignUpRequest,
    UpdateItemRequest,
};

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Anything addressed by a server-assigned `_id`.
pub trait Identified {
    fn id(&self) -> &str;
}

/// A reference the server either leaves as a bare id or populates with the
/// full document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Doc(T),
}

impl<T: Identified> Ref<T> {
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Doc(doc) => doc.id(),
        }
    }

    pub fn doc(&self) -> Option<&T> {
        match self {
            Ref::Id(_) => None,
            Ref::Doc(doc) => Some(doc),
        }
    }
}

pub(crate) fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum P {
        Num(f64),
        Str(String),
    }
    let p = Option::<P>::deserialize(deserializer)?;
    Ok(match p {
        Some(P::Num(n)) => Decimal::from_f64(n),
        Some(P::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}

pub(crate) fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Q {
        Num(i64),
        Float(f64),
        Str(String),
    }
    let q = Option::<Q>::deserialize(deserializer)?;
    Ok(match q {
        Some(Q::Num(n)) => crate::pricing::clamp_quantity(n),
        Some(Q::Float(f)) => crate::pricing::clamp_quantity(f as i64),
        Some(Q::Str(s)) => crate::pricing::parse_quantity(&s),
        None => 1,
    })
}

pub(crate) fn default_quantity() -> u32 {
    1
}

/// Images arrive either as a single URL or a list of URLs.
pub(crate) fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum I {
        One(String),
        Many(Vec<String>),
    }
    let i = Option::<I>::deserialize(deserializer)?;
    Ok(match i {
        Some(I::One(s)) if s.is_empty() => Vec::new(),
        Some(I::One(s)) => vec![s],
        Some(I::Many(v)) => v,
        None => Vec::new(),
    })
}

/// Free-text fields that some records store as numbers (pincodes, mobiles).
pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum T {
        Str(String),
        Int(i64),
        Float(f64),
    }
    let t = Option::<T>::deserialize(deserializer)?;
    Ok(t.map(|t| match t {
        T::Str(s) => s,
        T::Int(n) => n.to_string(),
        T::Float(f) => f.to_string(),
    }))
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
