use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    default_quantity, deserialize_price, deserialize_quantity, deserialize_text, null_as_default,
    Dish, Identified, Modifier, Ref,
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    /// Anything else the kitchen reports, typically a rejection.
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Completed => "COMPLETED",
            OrderStatus::Other(s) => s,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, OrderStatus::Other(_))
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => OrderStatus::Pending,
            "CONFIRMED" => OrderStatus::Confirmed,
            "COMPLETED" => OrderStatus::Completed,
            _ => OrderStatus::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    #[serde(default)]
    pub dish: Option<Ref<Dish>>,
    #[serde(default = "default_quantity", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub modifiers: Vec<Ref<Modifier>>,
}

impl OrderItem {
    pub fn dish_title(&self) -> Option<&str> {
        self.dish.as_ref().and_then(Ref::doc).map(|d| d.title.as_str())
    }

    pub fn modifier_names(&self) -> Vec<&str> {
        self.modifiers
            .iter()
            .map(|m| m.doc().map(|m| m.name.as_str()).unwrap_or_else(|| m.id()))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: OrderStatus,
    #[serde(rename = "fullName", default, deserialize_with = "deserialize_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub mobile: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub pincode: Option<String>,
    #[serde(rename = "totalAmount", default, deserialize_with = "deserialize_price")]
    pub total_amount: Option<Decimal>,
    #[serde(rename = "created_at", alias = "createdAt", default)]
    pub created_at: Option<String>,
}

impl Identified for Order {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!(OrderStatus::from("PENDING".to_string()), OrderStatus::Pending);
        assert_eq!(OrderStatus::from("confirmed".to_string()), OrderStatus::Confirmed);
        assert_eq!(OrderStatus::from("COMPLETED".to_string()), OrderStatus::Completed);
        let rejected = OrderStatus::from("REJECTED".to_string());
        assert!(rejected.is_rejected());
        assert_eq!(rejected.as_str(), "REJECTED");
        assert!(OrderStatus::Pending.is_open());
        assert!(!OrderStatus::Completed.is_open());
    }

    #[test]
    fn test_order_from_api_payload() {
        let json = r#"{
            "_id": "o1",
            "fullName": "Asha Rao",
            "mobile": 9876543210,
            "address": "12 MG Road",
            "city": "Pune",
            "state": "MH",
            "pincode": 411001,
            "status": "CONFIRMED",
            "totalAmount": 49.5,
            "created_at": "2024-03-01T10:00:00Z",
            "items": [
                {
                    "dish": {"_id": "d1", "title": "Burger", "price": 10},
                    "quantity": 3,
                    "modifiers": [{"_id": "m1", "name": "Bacon", "price": 2.5}, "m2"]
                },
                {"dish": "d2", "quantity": 2}
            ]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.pincode.as_deref(), Some("411001"));
        assert_eq!(order.mobile.as_deref(), Some("9876543210"));
        assert_eq!(order.total_amount, Some(Decimal::new(495, 1)));
        assert_eq!(order.items[0].dish_title(), Some("Burger"));
        assert_eq!(order.items[0].modifier_names(), vec!["Bacon", "m2"]);
        assert_eq!(order.items[1].dish_title(), None);
        assert!(order.items[1].modifiers.is_empty());
    }

    #[test]
    fn test_order_status_defaults_to_pending() {
        let order: Order = serde_json::from_str(r#"{"_id": "o2"}"#).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_status_serializes_as_label() {
        let json = serde_json::to_string(&OrderStatus::Completed).unwrap();
        assert_eq!(json, "\"COMPLETED\"");
    }
}
