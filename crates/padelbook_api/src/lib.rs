// --- File: crates/padelbook_api/src/lib.rs ---
pub mod client;
pub mod endpoints;

pub use client::{is_public_endpoint, ApiClient, PUBLIC_ENDPOINTS};
