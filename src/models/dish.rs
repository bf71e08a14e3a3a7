use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{deserialize_images, deserialize_price, Identified, Ref};
use crate::pricing::{sanitize_price, Money};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub image: Vec<String>,
}

impl Identified for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Price charged per unit, before modifiers.
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<Decimal>,
    /// Undiscounted list price, shown for comparison only.
    #[serde(rename = "actualPrice", default, deserialize_with = "deserialize_price")]
    pub actual_price: Option<Decimal>,
    #[serde(default, deserialize_with = "deserialize_images")]
    pub image: Vec<String>,
    #[serde(default)]
    pub category: Option<Ref<Category>>,
}

impl Dish {
    pub fn new(id: &str, title: &str, price: Decimal) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            price: Some(price),
            actual_price: None,
            image: Vec::new(),
            category: None,
        }
    }

    pub fn unit_price(&self) -> Money {
        Money::from_decimal(sanitize_price(self.price))
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.id())
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.image.first().map(String::as_str)
    }
}

impl Identified for Dish {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Modifier {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_price")]
    pub price: Option<Decimal>,
}

impl Modifier {
    pub fn new(id: &str, name: &str, price: Decimal) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price: Some(price),
        }
    }
}

impl Identified for Modifier {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_from_api_payload() {
        let json = r#"{
            "_id": "d1",
            "title": "Paneer Tikka",
            "description": "Smoky",
            "price": 249,
            "actualPrice": "299",
            "image": ["https://cdn/p1.jpg", "https://cdn/p2.jpg"],
            "category": {"_id": "c1", "name": "Starters"}
        }"#;
        let dish: Dish = serde_json::from_str(json).unwrap();
        assert_eq!(dish.unit_price().to_string(), "249.00");
        assert_eq!(dish.actual_price, Some(Decimal::from(299)));
        assert_eq!(dish.category_id(), Some("c1"));
        assert_eq!(dish.thumbnail(), Some("https://cdn/p1.jpg"));
    }

    #[test]
    fn test_dish_with_bare_category_id_and_no_price() {
        let dish: Dish =
            serde_json::from_str(r#"{"_id": "d2", "title": "Water", "category": "c9"}"#).unwrap();
        assert_eq!(dish.category_id(), Some("c9"));
        assert_eq!(dish.unit_price(), Money::ZERO);
        assert!(dish.thumbnail().is_none());
    }

    #[test]
    fn test_modifier_price_string() {
        let m: Modifier =
            serde_json::from_str(r#"{"_id": "m1", "name": "Extra cheese", "price": "30"}"#)
                .unwrap();
        assert_eq!(m, Modifier::new("m1", "Extra cheese", Decimal::from(30)));
    }
}
