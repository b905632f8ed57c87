//! Form checks done before anything is sent to the backend.

use padelbook_common::models::{Credentials, RegisterRequest};
use padelbook_common::{validation_error, ClientError};

/// The registration form as the user filled it in.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Checks the form and produces the request body.
    pub fn validate(&self) -> Result<RegisterRequest, ClientError> {
        if [&self.name, &self.email, &self.password, &self.confirm_password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(validation_error("All fields are required"));
        }
        if self.password != self.confirm_password {
            return Err(validation_error("Passwords do not match!"));
        }
        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Rejects a login form with a blank field.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ClientError> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(validation_error("Email and password are required"));
    }
    Ok(())
}
