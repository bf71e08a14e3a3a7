use serde::{Deserialize, Serialize};

use super::{default_quantity, deserialize_quantity, null_as_default, Dish, Modifier};
use crate::pricing::{cart_total, line_total, Money};

/// One dish in the cart with its selected modifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub dish: Option<Dish>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modifiers: Vec<Modifier>,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
}

impl LineItem {
    pub fn total(&self) -> Money {
        line_total(
            self.dish.as_ref().and_then(|d| d.price),
            self.modifiers.iter().map(|m| m.price),
            self.quantity,
        )
    }

    pub fn modifier_ids(&self) -> Vec<String> {
        self.modifiers.iter().map(|m| m.id.clone()).collect()
    }

    pub fn has_modifier(&self, modifier_id: &str) -> bool {
        self.modifiers.iter().any(|m| m.id == modifier_id)
    }

    pub fn title(&self) -> &str {
        self.dish.as_ref().map(|d| d.title.as_str()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<LineItem>,
}

impl Cart {
    pub fn total(&self) -> Money {
        cart_total(&self.items)
    }

    pub fn find(&self, item_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn summary(&self) -> CartSummary {
        let items = self
            .items
            .iter()
            .map(|item| LineSummary {
                id: item.id.clone(),
                title: item.title().to_string(),
                unit_price: item
                    .dish
                    .as_ref()
                    .map(Dish::unit_price)
                    .unwrap_or(Money::ZERO),
                modifiers: item.modifiers.iter().map(|m| m.name.clone()).collect(),
                quantity: item.quantity,
                total: item.total(),
            })
            .collect();
        CartSummary {
            items,
            total: self.total(),
        }
    }
}

/// Display rows for a cart, with every amount already formatted.
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub items: Vec<LineSummary>,
    pub total: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineSummary {
    pub id: String,
    pub title: String,
    pub unit_price: Money,
    pub modifiers: Vec<String>,
    pub quantity: u32,
    pub total: Money,
}
