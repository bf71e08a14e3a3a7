use tracing::info;

use crate::api::StoreApi;
use crate::error::{Result, StoreError};
use crate::models::{SignInRequest, SignUpRequest};
use crate::session::Session;
use crate::utils::blank_fields;

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<SignUpRequest> {
        let missing = blank_fields(&[
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("confirmPassword", self.confirm_password.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(StoreError::validation(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )));
        }
        if self.password != self.confirm_password {
            return Err(StoreError::validation("Passwords do not match"));
        }
        Ok(SignUpRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<SignInRequest> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(StoreError::validation("Please fill in both fields"));
        }
        Ok(SignInRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

pub async fn sign_up(api: &StoreApi, form: &SignUpForm) -> Result<String> {
    let request = form.validate()?;
    let message = api.sign_up(&request).await?;
    info!(username = %request.username, "account registered");
    Ok(message)
}

/// Signs in and stores the issued token in `session`.
pub async fn sign_in(api: &StoreApi, session: &mut Session, form: &SignInForm) -> Result<String> {
    let request = form.validate()?;
    let response = api.sign_in(&request).await?;
    if response.token.is_empty() {
        return Err(StoreError::Network {
            status: None,
            message: "Sign-in succeeded but no token was issued".to_string(),
        });
    }
    session.set_token(&response.token)?;
    info!(email = %request.email, "signed in");
    Ok(response
        .message
        .unwrap_or_else(|| "Logged in successfully".to_string()))
}

pub fn sign_out(session: &mut Session) -> Result<()> {
    session.clear()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign_up_form() -> SignUpForm {
        SignUpForm {
            username: " asha ".to_string(),
            email: "asha@example.com".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_sign_up_valid() {
        let request = sign_up_form().validate().unwrap();
        assert_eq!(request.username, "asha");
        assert_eq!(request.confirm_password, "hunter22");
    }

    #[test]
    fn test_sign_up_password_mismatch() {
        let mut form = sign_up_form();
        form.confirm_password = "hunter23".to_string();
        let err = form.validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_sign_up_missing_field() {
        let mut form = sign_up_form();
        form.email = " ".to_string();
        assert!(matches!(form.validate(), Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let form = SignInForm {
            email: "asha@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate().unwrap_err().to_string(), "Please fill in both fields");

        let form = SignInForm {
            email: " asha@example.com ".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(form.validate().unwrap().email, "asha@example.com");
    }

    #[test]
    fn test_sign_out_clears_session() {
        let mut session = Session::with_token("tok");
        sign_out(&mut session).unwrap();
        assert!(!session.is_signed_in());
    }
}
