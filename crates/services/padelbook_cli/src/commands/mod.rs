//! Subcommands, one per screen or action.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod reservations;

use anyhow::bail;
use chrono::{Local, NaiveDate};
use padelbook_booking::validate_booking_date;
use padelbook_common::models::{CourtId, ReservationId, SlotId};
use padelbook_common::ClientError;
use padelbook_session::Route;

use crate::app_state::AppState;

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Create an account.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// Log in right after registering.
        #[arg(long)]
        login: bool,
    },
    /// Log in and store the session.
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show the current user.
    Whoami,
    /// List courts.
    Courts {
        /// Also list each court's photos.
        #[arg(long)]
        photos: bool,
    },
    /// List the slot catalogue.
    Slots,
    /// Free slots of one court.
    Availability {
        #[arg(long)]
        court: CourtId,
        /// Defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Availability across all courts, as the backend reports it.
    AvailabilityAll {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Price a set of slots.
    Quote {
        #[arg(long)]
        court: CourtId,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long = "slot", required = true)]
        slots: Vec<SlotId>,
    },
    /// Book a set of slots.
    Book {
        #[arg(long)]
        court: CourtId,
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long = "slot", required = true)]
        slots: Vec<SlotId>,
    },
    /// List your reservations.
    Reservations,
    /// Cancel one of your reservations.
    Cancel { id: ReservationId },
    /// Admin views.
    Admin {
        #[command(subcommand)]
        action: admin::AdminAction,
    },
}

pub async fn run(command: Command, state: &AppState) -> anyhow::Result<()> {
    match command {
        Command::Register {
            name,
            email,
            password,
            confirm_password,
            login,
        } => auth::register(state, name, email, password, confirm_password, login).await,
        Command::Login { email, password } => auth::login(state, email, password).await,
        Command::Logout => auth::logout(state),
        Command::Whoami => auth::whoami(state).await,
        Command::Courts { photos } => booking::courts(state, photos).await,
        Command::Slots => booking::slots(state).await,
        Command::Availability { court, date } => booking::availability(state, court, date).await,
        Command::AvailabilityAll { date } => booking::availability_all(state, date).await,
        Command::Quote { court, date, slots } => booking::quote(state, court, date, &slots).await,
        Command::Book { court, date, slots } => booking::book(state, court, date, &slots).await,
        Command::Reservations => reservations::list(state).await,
        Command::Cancel { id } => reservations::cancel(state, id).await,
        Command::Admin { action } => admin::run(state, action).await,
    }
}

/// A failure the user has already been shown through the interaction port.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct AlreadyReported(pub ClientError);

/// Enters `route`, failing when the user would be redirected away from it.
pub async fn require(state: &AppState, route: Route) -> anyhow::Result<()> {
    match state.auth.enter(route).await {
        landed if landed == route => Ok(()),
        Route::Landing => bail!("You are not logged in. Run `padelbook login` first."),
        _ => bail!("Administrator access required."),
    }
}

/// The requested booking date, defaulting to today. Past dates are refused.
pub fn booking_date(date: Option<NaiveDate>) -> anyhow::Result<NaiveDate> {
    let today = Local::now().date_naive();
    Ok(validate_booking_date(date.unwrap_or(today), today)?)
}
