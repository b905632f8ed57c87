//! Admin screen.

use std::io::{self, Write};

use padelbook_booking::{all_reservations, UserDirectory};
use padelbook_session::Route;

use super::require;
use crate::app_state::AppState;
use crate::render;

#[derive(clap::Subcommand, Debug)]
pub enum AdminAction {
    /// List registered users.
    Users {
        /// Filter by name or email.
        #[arg(short, long)]
        search: Option<String>,
    },
    /// List every reservation.
    Reservations,
}

pub async fn run(state: &AppState, action: AdminAction) -> anyhow::Result<()> {
    require(state, Route::Admin).await?;
    let mut out = io::stdout();
    match action {
        AdminAction::Users { search } => {
            let directory = UserDirectory::load(&state.api).await?;
            let users = directory.search(search.as_deref().unwrap_or(""));
            writeln!(out, "{} of {} users", users.len(), directory.users().len())?;
            for user in users {
                writeln!(out, "{}", render::admin_user_line(user))?;
            }
        }
        AdminAction::Reservations => {
            for reservation in all_reservations(&state.api).await? {
                writeln!(out, "{}", render::reservation_line(&reservation))?;
            }
        }
    }
    Ok(())
}
