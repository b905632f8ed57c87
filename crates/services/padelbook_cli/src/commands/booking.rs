//! The dashboard: courts, availability, quotes and booking.

use std::io::{self, Write};

use anyhow::bail;
use chrono::NaiveDate;
use padelbook_booking::{BookingOrchestrator, ConfirmOutcome};
use padelbook_common::models::{CourtId, SlotId};
use padelbook_common::ClientError;
use padelbook_session::Route;

use super::{booking_date, require, AlreadyReported};
use crate::app_state::AppState;
use crate::render;

pub async fn courts(state: &AppState, photos: bool) -> anyhow::Result<()> {
    require(state, Route::Dashboard).await?;
    let orchestrator = BookingOrchestrator::new(state.api.clone(), state.port.clone());
    orchestrator.load().await?;

    let mut out = io::stdout();
    for court in orchestrator.snapshot().await.courts {
        writeln!(out, "{}", render::court_line(&court))?;
        if photos {
            for line in render::court_photo_lines(&court) {
                writeln!(out, "{line}")?;
            }
        }
    }
    Ok(())
}

pub async fn slots(state: &AppState) -> anyhow::Result<()> {
    require(state, Route::Dashboard).await?;
    let mut out = io::stdout();
    for slot in state.api.time_slots().await? {
        writeln!(out, "{}", render::slot_line(&slot))?;
    }
    Ok(())
}

pub async fn availability(
    state: &AppState,
    court: CourtId,
    date: Option<NaiveDate>,
) -> anyhow::Result<()> {
    let orchestrator = open_court(state, court, date).await?;
    print_availability(&orchestrator).await
}

pub async fn availability_all(state: &AppState, date: Option<NaiveDate>) -> anyhow::Result<()> {
    require(state, Route::Dashboard).await?;
    let date = booking_date(date)?;
    let data = state.api.availability_all(date).await?;
    writeln!(io::stdout(), "{}", serde_json::to_string_pretty(&data)?)?;
    Ok(())
}

pub async fn quote(
    state: &AppState,
    court: CourtId,
    date: Option<NaiveDate>,
    slots: &[SlotId],
) -> anyhow::Result<()> {
    let orchestrator = open_court(state, court, date).await?;
    select_slots(&orchestrator, slots).await?;
    print_quote(&orchestrator).await
}

pub async fn book(
    state: &AppState,
    court: CourtId,
    date: Option<NaiveDate>,
    slots: &[SlotId],
) -> anyhow::Result<()> {
    let orchestrator = open_court(state, court, date).await?;
    select_slots(&orchestrator, slots).await?;
    print_quote(&orchestrator).await?;

    // A rejected booking was already shown by the port; local refusals were not.
    let outcome = orchestrator.confirm().await.map_err(|err| match err {
        ClientError::ValidationLocal(_) => anyhow::Error::from(err),
        err => AlreadyReported(err).into(),
    })?;
    match outcome {
        ConfirmOutcome::NothingSelected => bail!("No slots selected."),
        ConfirmOutcome::ViewReservations(_) => super::reservations::list(state).await,
        ConfirmOutcome::Stayed(_) => print_availability(&orchestrator).await,
    }
}

/// Dashboard with `court` and the booking date selected.
async fn open_court(
    state: &AppState,
    court: CourtId,
    date: Option<NaiveDate>,
) -> anyhow::Result<BookingOrchestrator> {
    require(state, Route::Dashboard).await?;
    let date = booking_date(date)?;
    let orchestrator =
        BookingOrchestrator::with_date(state.api.clone(), state.port.clone(), date);
    orchestrator.load().await?;
    orchestrator.select_court(court).await?;
    Ok(orchestrator)
}

async fn select_slots(orchestrator: &BookingOrchestrator, slots: &[SlotId]) -> anyhow::Result<()> {
    for &slot in slots {
        if orchestrator.snapshot().await.selection.contains(&slot) {
            continue;
        }
        orchestrator.toggle_slot(slot).await?;
    }
    Ok(())
}

async fn print_availability(orchestrator: &BookingOrchestrator) -> anyhow::Result<()> {
    let snapshot = orchestrator.snapshot().await;
    let mut out = io::stdout();
    if let Some(court) = &snapshot.court {
        writeln!(out, "{} on {}", court.name, snapshot.date.format("%d/%m/%Y"))?;
    }
    match snapshot.availability.as_deref() {
        Some([]) | None => writeln!(out, "  No free slots.")?,
        Some(slots) => {
            for slot in slots {
                writeln!(out, "  {}", render::slot_line(slot))?;
            }
        }
    }
    Ok(())
}

async fn print_quote(orchestrator: &BookingOrchestrator) -> anyhow::Result<()> {
    let snapshot = orchestrator.snapshot().await;
    if let Some(quote) = &snapshot.quote {
        writeln!(io::stdout(), "{}", render::quote_line(quote))?;
    }
    Ok(())
}
