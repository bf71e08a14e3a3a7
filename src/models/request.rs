use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AddItemRequest {
    #[serde(rename = "dishId")]
    pub dish_id: String,
    #[serde(rename = "modifierIds")]
    pub modifier_ids: Vec<String>,
    pub quantity: u32,
}

/// Full desired state of a line item; the server replaces, never merges.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdateItemRequest {
    pub quantity: u32,
    #[serde(rename = "modifierIds")]
    pub modifier_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutItem {
    pub dish: String,
    pub quantity: u32,
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
    #[serde(rename = "totalAmount", with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub address: String,
    pub mobile: String,
    /// The order service still reads the legacy `street` key.
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SignUpRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_item_wire_shape() {
        let req = UpdateItemRequest {
            quantity: 2,
            modifier_ids: vec!["m1".to_string()],
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"quantity": 2, "modifierIds": ["m1"]}));
    }

    #[test]
    fn test_checkout_total_is_a_json_number() {
        let req = CheckoutRequest {
            items: vec![CheckoutItem {
                dish: "d1".to_string(),
                quantity: 3,
                modifiers: vec!["m1".to_string()],
            }],
            total_amount: Decimal::new(4950, 2),
            full_name: "Asha Rao".to_string(),
            address: "12 MG Road".to_string(),
            mobile: "98765".to_string(),
            street: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            pincode: "411001".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["totalAmount"], serde_json::json!(49.5));
        assert_eq!(json["fullName"], "Asha Rao");
        assert_eq!(json["items"][0]["modifiers"][0], "m1");
    }
}
