//! Who is using the client right now.

use crate::registration::{validate_credentials, RegistrationForm};
use crate::routes::Route;
use padelbook_api::ApiClient;
use padelbook_common::models::{Credentials, User};
use padelbook_common::ClientError;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

/// The identity the client currently acts as.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Authenticated(user) => Some(user),
            Identity::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(User::is_admin)
    }
}

/// Identity derived from the stored token plus the last `/me` answer.
///
/// Without a token the identity is always [`Identity::Anonymous`], whatever
/// was cached before.
pub struct AuthState {
    api: Arc<ApiClient>,
    identity: watch::Sender<Identity>,
}

impl AuthState {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let (identity, _rx) = watch::channel(Identity::Anonymous);
        Self { api, identity }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn has_token(&self) -> bool {
        self.api.session().has_token()
    }

    pub fn current(&self) -> Identity {
        if !self.has_token() {
            return Identity::Anonymous;
        }
        self.identity.borrow().clone()
    }

    /// Watch identity changes made through this state.
    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.identity.subscribe()
    }

    /// Re-derives the identity. A token the backend will not vouch for is dropped.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Identity {
        if !self.has_token() {
            return self.publish(Identity::Anonymous);
        }
        match self.api.me().await {
            Ok(user) => self.publish(Identity::Authenticated(user)),
            Err(err) => {
                warn!(error = %err, "could not confirm identity, dropping session");
                self.api.logout();
                self.publish(Identity::Anonymous)
            }
        }
    }

    /// Resolves where a request for `route` actually lands.
    ///
    /// Every entry re-derives the identity, public screens included.
    pub async fn enter(&self, route: Route) -> Route {
        let identity = self.refresh().await;
        let landed = route.guard(self.has_token(), &identity);
        if landed != route {
            info!(requested = route.path(), landed = landed.path(), "redirected");
        }
        landed
    }

    pub async fn enter_path(&self, path: &str) -> Route {
        self.enter(Route::from_path(path)).await
    }

    /// Logs in and heads for the dashboard.
    pub async fn login(&self, credentials: &Credentials) -> Result<Route, ClientError> {
        validate_credentials(credentials)?;
        self.api.login(credentials).await?;
        Ok(self.enter(Route::Dashboard).await)
    }

    /// Creates an account and heads for the login screen. Nothing is sent
    /// when the form fails its local checks.
    pub async fn register(&self, form: &RegistrationForm) -> Result<Route, ClientError> {
        let request = form.validate()?;
        self.api.register(&request).await?;
        info!(email = %request.email, "account registered");
        Ok(Route::Login)
    }

    pub fn logout(&self) -> Route {
        self.api.logout();
        self.publish(Identity::Anonymous);
        Route::Landing
    }

    fn publish(&self, identity: Identity) -> Identity {
        self.identity.send_replace(identity.clone());
        identity
    }
}
