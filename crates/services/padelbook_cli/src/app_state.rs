use anyhow::Context;
use padelbook_api::ApiClient;
use padelbook_common::InteractionPort;
use padelbook_config::AppConfig;
use padelbook_session::{AuthState, FileSessionStore};
use std::sync::Arc;

use crate::prompt::TerminalPrompter;

/// Everything a command needs, built once from the loaded configuration.
pub struct AppState {
    pub api: Arc<ApiClient>,
    pub auth: AuthState,
    pub port: Arc<dyn InteractionPort>,
}

impl AppState {
    pub fn build(config: &AppConfig, assume_yes: bool) -> anyhow::Result<Self> {
        let store = FileSessionStore::from_config(&config.session)
            .context("failed to open session storage")?;
        tracing::debug!(path = %store.path().display(), "using session file");
        let api = Arc::new(
            ApiClient::new(&config.api, Arc::new(store)).context("failed to build HTTP client")?,
        );
        Ok(Self {
            auth: AuthState::new(api.clone()),
            api,
            port: Arc::new(TerminalPrompter::new(assume_yes)),
        })
    }
}
