// --- File: crates/padelbook_common/src/lib.rs ---

pub mod error; // Error taxonomy
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Wire and domain models
pub mod services; // Storage and interaction ports


// Re-export error types and utilities for easier access
pub use error::{backend_rejected, validation_error, ClientError};

pub use http::client::{client_for, create_client};

pub use logging::{init_from_config, log_error};

pub use services::{
    ConfirmPrompt, InteractionPort, MemorySessionStore, Notice, NoticeLevel, SessionStore,
};
