use serde::Serialize;

use crate::error::{Result, StoreError};
use crate::utils::blank_fields;

/// What the user typed into the checkout form. Fields are kept as entered;
/// [`CheckoutForm::validate`] trims them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutForm {
    pub full_name: String,
    pub mobile: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    open: bool,
}

impl CheckoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Empties every field and closes the form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        blank_fields(&[
            ("fullName", self.full_name.as_str()),
            ("mobile", self.mobile.as_str()),
            ("address", self.address.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("pincode", self.pincode.as_str()),
        ])
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn validate(&self) -> Result<DeliveryDetails> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::validation(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(DeliveryDetails {
            full_name: self.full_name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
        })
    }
}

/// Trimmed, non-empty delivery fields ready to submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeliveryDetails {
    pub full_name: String,
    pub mobile: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}
