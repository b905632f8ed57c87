
pub mod auth_state; // Identity derived from the stored token
pub mod registration; // Local form checks
pub mod routes; // Screens and access rules
pub mod store; // File-backed token storage

#[cfg(test)]
mod store_test;

pub use auth_state::{AuthState, Identity};
pub use registration::{validate_credentials, RegistrationForm};
pub use routes::Route;
pub use store::FileSessionStore;
