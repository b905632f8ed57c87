//! Admin views: every user and every reservation.

use padelbook_api::ApiClient;
use padelbook_common::models::{AdminUser, Reservation};
use padelbook_common::ClientError;
use tracing::info;

/// The admin user table with its search box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDirectory {
    users: Vec<AdminUser>,
}

impl UserDirectory {
    pub fn new(users: Vec<AdminUser>) -> Self {
        Self { users }
    }

    pub async fn load(api: &ApiClient) -> Result<Self, ClientError> {
        let users = api.users().await?;
        info!(count = users.len(), "user directory loaded");
        Ok(Self::new(users))
    }

    pub fn users(&self) -> &[AdminUser] {
        &self.users
    }

    /// Users whose name or email contains `query`, ignoring case. A blank
    /// query matches everyone.
    pub fn search(&self, query: &str) -> Vec<&AdminUser> {
        let query = query.trim();
        self.users
            .iter()
            .filter(|user| query.is_empty() || user.matches(query))
            .collect()
    }
}

/// Every reservation in the system.
pub async fn all_reservations(api: &ApiClient) -> Result<Vec<Reservation>, ClientError> {
    let reservations = api.all_reservations().await?;
    info!(count = reservations.len(), "all reservations loaded");
    Ok(reservations)
}
